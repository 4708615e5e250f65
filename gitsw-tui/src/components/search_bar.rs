use crate::theme::Theme;
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Start byte and display width of the longest tail of `text` that fits in
/// `max_width` columns while leaving one column for the cursor.
fn visible_tail(text: &str, max_width: usize) -> (usize, usize) {
    let budget = max_width.saturating_sub(1);
    let mut start = text.len();
    let mut width = 0;
    for (idx, grapheme) in text.grapheme_indices(true).rev() {
        let g_width = grapheme.width();
        if width + g_width > budget {
            break;
        }
        width += g_width;
        start = idx;
    }
    (start, width)
}

/// Render `<label>: <input>` with the terminal cursor after the input.
pub fn draw(f: &mut Frame, area: Rect, label: &str, input: &str, theme: &Theme) {
    let prompt = format!("{label}: ");
    let prompt_width = u16::try_from(prompt.width()).unwrap_or(u16::MAX);
    let available = area.width.saturating_sub(prompt_width);
    let (start, width) = visible_tail(input, available as usize);

    let line = Line::from(vec![
        Span::styled(prompt, theme.input()),
        Span::styled(&input[start..], theme.input()),
    ]);
    f.render_widget(Paragraph::new(line), area);

    if area.width > 0 && area.height > 0 {
        let offset = prompt_width.saturating_add(u16::try_from(width).unwrap_or(u16::MAX));
        let cursor_x = area
            .x
            .saturating_add(offset)
            .min(area.right().saturating_sub(1));
        f.set_cursor_position((cursor_x, area.y));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::render_to_string;

    #[test]
    fn test_visible_tail_fits() {
        assert_eq!(visible_tail("hello", 10), (0, 5));
        assert_eq!(visible_tail("", 10), (0, 0));
    }

    #[test]
    fn test_visible_tail_scrolls() {
        let (start, width) = visible_tail("hello world", 5);
        assert_eq!(&"hello world"[start..], "orld");
        assert_eq!(width, 4);
    }

    #[test]
    fn test_visible_tail_keeps_graphemes_whole() {
        let text = "A👩‍💻B";
        let (start, width) = visible_tail(text, 4);
        assert_eq!(&text[start..], "👩‍💻B");
        assert_eq!(width, 3);

        let text = "e\u{0301}x";
        let (start, _) = visible_tail(text, 3);
        assert_eq!(&text[start..], text);
    }

    #[test]
    fn test_search_line_render() {
        let theme = Theme::default();
        let output = render_to_string(30, 1, |f| draw(f, f.area(), "search", "feat", &theme));
        assert_eq!(output.trim_end(), "search: feat");
    }

    #[test]
    fn test_search_line_custom_label() {
        let theme = Theme::default();
        let output = render_to_string(30, 1, |f| draw(f, f.area(), "branch", "", &theme));
        assert_eq!(output.trim_end(), "branch:");
    }
}

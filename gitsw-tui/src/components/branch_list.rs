use crate::theme::Theme;
use gitsw_core::{matcher, state::SelectionState};
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

/// Render the rows inside the current window. Pinned rows carry the prefix
/// in the normal style; the matched part of each label is bold.
pub fn draw(f: &mut Frame, area: Rect, state: &SelectionState, pinned_prefix: &str, theme: &Theme) {
    let lines: Vec<Line> = state
        .window()
        .map(|(idx, label)| {
            row(
                label,
                &state.input,
                idx == state.selected,
                state.is_pinned(label).then_some(pinned_prefix),
                theme,
            )
        })
        .collect();
    f.render_widget(Paragraph::new(lines), area);
}

fn row<'a>(
    label: &'a str,
    input: &str,
    selected: bool,
    prefix: Option<&str>,
    theme: &Theme,
) -> Line<'a> {
    let (style, matched) = if selected {
        (theme.selected(), theme.selected_matched())
    } else {
        (theme.normal(), theme.matched())
    };

    let mut spans = Vec::with_capacity(4);
    if let Some(prefix) = prefix {
        spans.push(Span::styled(format!("{prefix} "), theme.normal()));
    }
    match matcher::match_range(label, input) {
        Some(range) => {
            spans.push(Span::styled(&label[..range.start], style));
            spans.push(Span::styled(&label[range.clone()], matched));
            spans.push(Span::styled(&label[range.end..], style));
        }
        None => spans.push(Span::styled(label, style)),
    }
    Line::from(spans)
}

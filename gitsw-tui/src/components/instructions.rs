use crate::theme::Theme;
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

pub fn draw(f: &mut Frame, area: Rect, theme: &Theme) {
    let line = Line::from(vec![
        Span::styled("CTRL+D", theme.hint()),
        Span::styled(": Pin Selected Branch, ", theme.muted()),
        Span::styled("CTRL+U", theme.hint()),
        Span::styled(": Unpin Selected Branch", theme.muted()),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

use crate::theme::Theme;
use ratatui::{Frame, layout::Rect, text::Span, widgets::Paragraph};

pub fn draw(f: &mut Frame, area: Rect, error: &str, theme: &Theme) {
    let error_line = Paragraph::new(Span::styled(format!("Error: {error}"), theme.error()));
    f.render_widget(error_line, area);
}

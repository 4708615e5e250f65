use crate::theme::Theme;
use ratatui::{Frame, layout::Rect, text::Span, widgets::Paragraph};

/// The "checked out: <branch>" line.
pub fn draw(f: &mut Frame, area: Rect, current: &str, theme: &Theme) {
    let line = Span::styled(format!("checked out: {current}"), theme.current());
    f.render_widget(Paragraph::new(line), area);
}

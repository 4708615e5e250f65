use ratatui::layout::{Constraint, Layout, Rect};

pub mod branch_list;
pub mod error_bar;
pub mod header;
pub mod instructions;
pub mod search_bar;

/// Screen areas of the picker, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickerLayout {
    pub instructions: Option<Rect>,
    pub header: Option<Rect>,
    pub search: Rect,
    pub list: Rect,
    pub error: Option<Rect>,
}

/// Split `area` into the picker rows. Instructions and the header are each
/// followed by a blank row, as is the search line. The error line sits
/// directly below the last list row.
pub fn picker_layout(
    area: Rect,
    show_instructions: bool,
    show_header: bool,
    list_rows: usize,
    show_error: bool,
) -> PickerLayout {
    let mut constraints = Vec::with_capacity(9);
    let instructions = show_instructions.then(|| {
        let idx = row(&mut constraints, 1);
        row(&mut constraints, 1);
        idx
    });
    let header = show_header.then(|| {
        let idx = row(&mut constraints, 1);
        row(&mut constraints, 1);
        idx
    });
    let search = row(&mut constraints, 1);
    row(&mut constraints, 1);
    let list = row(
        &mut constraints,
        u16::try_from(list_rows).unwrap_or(u16::MAX),
    );
    let error = show_error.then(|| row(&mut constraints, 1));
    constraints.push(Constraint::Min(0));

    let chunks = Layout::vertical(constraints).split(area);
    PickerLayout {
        instructions: instructions.map(|i| chunks[i]),
        header: header.map(|i| chunks[i]),
        search: chunks[search],
        list: chunks[list],
        error: error.map(|i| chunks[i]),
    }
}

fn row(constraints: &mut Vec<Constraint>, height: u16) -> usize {
    constraints.push(Constraint::Length(height));
    constraints.len() - 1
}

#[cfg(test)]
pub(crate) fn render_to_string(
    width: u16,
    height: u16,
    draw: impl FnOnce(&mut ratatui::Frame),
) -> String {
    use ratatui::{Terminal, backend::TestBackend};

    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(draw).unwrap();
    buffer_to_string(terminal.backend().buffer())
}

#[cfg(test)]
pub(crate) fn buffer_to_string(buffer: &ratatui::buffer::Buffer) -> String {
    let mut output = String::new();
    for y in 0..buffer.area.height {
        let mut line = String::new();
        for x in 0..buffer.area.width {
            line.push_str(buffer[(x, y)].symbol());
        }
        output.push_str(line.trim_end());
        output.push('\n');
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_full() {
        let layout = picker_layout(Rect::new(0, 0, 40, 20), true, true, 3, true);
        assert_eq!(layout.instructions, Some(Rect::new(0, 0, 40, 1)));
        assert_eq!(layout.header, Some(Rect::new(0, 2, 40, 1)));
        assert_eq!(layout.search, Rect::new(0, 4, 40, 1));
        assert_eq!(layout.list, Rect::new(0, 6, 40, 3));
        assert_eq!(layout.error, Some(Rect::new(0, 9, 40, 1)));
    }

    #[test]
    fn test_layout_minimal() {
        let layout = picker_layout(Rect::new(0, 0, 40, 20), false, false, 5, false);
        assert_eq!(layout.instructions, None);
        assert_eq!(layout.header, None);
        assert_eq!(layout.search, Rect::new(0, 0, 40, 1));
        assert_eq!(layout.list, Rect::new(0, 2, 40, 5));
        assert_eq!(layout.error, None);
    }
}

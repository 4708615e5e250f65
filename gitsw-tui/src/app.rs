use crate::{
    components::{self, branch_list, error_bar, header, instructions, search_bar},
    event::{CrosstermEvents, EventSource},
    keymap,
    terminal::TerminalGuard,
    theme::Theme,
};
use anyhow::{Context, Result};
use crossterm::event::{Event, KeyEventKind};
use gitsw_core::{
    config::{Config, DEFAULT_PINNED_PREFIX, DEFAULT_SEARCH_LABEL, FeaturesConfig},
    pins::PinStore,
    state::{SelectionRequest, SelectionResult, SelectionState},
};
use ratatui::{Frame, Terminal, backend::Backend};

/// Presentation settings for one picker session.
#[derive(Debug, Clone)]
pub struct PickerOptions {
    pub theme: Theme,
    pub search_label: String,
    pub pinned_prefix: String,
    pub features: FeaturesConfig,
}

impl Default for PickerOptions {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            search_label: DEFAULT_SEARCH_LABEL.to_string(),
            pinned_prefix: DEFAULT_PINNED_PREFIX.to_string(),
            features: FeaturesConfig::default(),
        }
    }
}

impl PickerOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            theme: Theme::from_config(&config.theme),
            search_label: config.search_label.clone(),
            pinned_prefix: config.pinned_prefix.clone(),
            features: config.features,
        }
    }
}

/// Open the real terminal, run one session and restore the terminal.
pub fn pick(
    request: SelectionRequest,
    options: &PickerOptions,
    store: &dyn PinStore,
) -> Result<SelectionResult> {
    let mut guard = TerminalGuard::acquire()?;
    run_selection(
        guard.terminal_mut(),
        &mut CrosstermEvents,
        request,
        options,
        store,
    )
}

/// Run the draw, read, dispatch cycle until the user confirms or cancels.
///
/// Terminal failures end the session with an error. Pin store failures are
/// shown on the error line and the session carries on.
pub fn run_selection<B: Backend>(
    terminal: &mut Terminal<B>,
    events: &mut dyn EventSource,
    request: SelectionRequest,
    options: &PickerOptions,
    store: &dyn PinStore,
) -> Result<SelectionResult>
where
    B::Error: Send + Sync + 'static,
{
    let mut state = SelectionState::new(request);
    log::debug!(
        "picker started with {} visible branches",
        state.visible.len()
    );

    while !state.is_done() {
        terminal
            .draw(|f| draw(f, &state, options))
            .context("failed to draw picker")?;

        // Resize and everything else just trigger a redraw
        if let Event::Key(key) = events.next_event()?
            && key.kind == KeyEventKind::Press
        {
            match keymap::resolve_action(key, options.features) {
                Some(action) => {
                    log::trace!("key {:?} -> {action:?}", key.code);
                    state.apply(action, store);
                }
                // Clear error on any keypress
                None => state.error = None,
            }
        }
    }

    state
        .into_result()
        .ok_or_else(|| anyhow::anyhow!("picker finished without an outcome"))
}

fn draw(f: &mut Frame, state: &SelectionState, options: &PickerOptions) {
    let current = state
        .current()
        .filter(|_| options.features.current_branch);
    let list_rows = state.window_size().min(state.visible.len());
    let layout = components::picker_layout(
        f.area(),
        options.features.pinning,
        current.is_some(),
        list_rows,
        state.error.is_some(),
    );

    if let Some(area) = layout.instructions {
        instructions::draw(f, area, &options.theme);
    }
    if let (Some(area), Some(current)) = (layout.header, current) {
        header::draw(f, area, current, &options.theme);
    }
    search_bar::draw(
        f,
        layout.search,
        &options.search_label,
        &state.input,
        &options.theme,
    );
    branch_list::draw(f, layout.list, state, &options.pinned_prefix, &options.theme);
    if let (Some(area), Some(error)) = (layout.error, state.error.as_deref()) {
        error_bar::draw(f, area, error, &options.theme);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{components::buffer_to_string, event::ScriptedEvents};
    use crossterm::event::{KeyCode, KeyEvent, KeyEventState, KeyModifiers};
    use gitsw_core::{
        pins::{NoopPinStore, PinChange, RecordingPinStore},
        state::SelectionOutcome,
    };
    use ratatui::{
        backend::{ClearType, TestBackend, WindowSize},
        buffer::Cell,
        layout::{Position, Size},
    };
    use std::io;

    /// Backend whose every draw fails with the same I/O error.
    struct BrokenPipeBackend;

    impl Backend for BrokenPipeBackend {
        type Error = io::Error;

        fn draw<'a, I>(&mut self, _content: I) -> io::Result<()>
        where
            I: Iterator<Item = (u16, u16, &'a Cell)>,
        {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "stdout closed"))
        }

        fn hide_cursor(&mut self) -> io::Result<()> {
            Ok(())
        }

        fn show_cursor(&mut self) -> io::Result<()> {
            Ok(())
        }

        fn get_cursor_position(&mut self) -> io::Result<Position> {
            Ok(Position::ORIGIN)
        }

        fn set_cursor_position<P: Into<Position>>(&mut self, _position: P) -> io::Result<()> {
            Ok(())
        }

        fn clear(&mut self) -> io::Result<()> {
            Ok(())
        }

        fn clear_region(&mut self, _clear_type: ClearType) -> io::Result<()> {
            Ok(())
        }

        fn size(&self) -> io::Result<Size> {
            Ok(Size::new(60, 12))
        }

        fn window_size(&mut self) -> io::Result<WindowSize> {
            Ok(WindowSize {
                columns_rows: Size::new(60, 12),
                pixels: Size::new(0, 0),
            })
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    fn request(candidates: &[&str], pinned: &[&str]) -> SelectionRequest {
        SelectionRequest {
            pinned: labels(pinned),
            current: Some("main".to_string()),
            window_size: 3,
            ..SelectionRequest::new(labels(candidates))
        }
    }

    fn run(
        request: SelectionRequest,
        options: &PickerOptions,
        mut events: ScriptedEvents,
        store: &dyn PinStore,
    ) -> (Result<SelectionResult>, String) {
        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        let result = run_selection(&mut terminal, &mut events, request, options, store);
        let screen = buffer_to_string(terminal.backend().buffer());
        (result, screen)
    }

    #[test]
    fn test_type_and_confirm() {
        let events = ScriptedEvents::default().text("FEAT").key(KeyCode::Enter);
        let (result, screen) = run(
            request(&["main", "feature/a", "feature/b"], &[]),
            &PickerOptions::default(),
            events,
            &NoopPinStore,
        );
        let result = result.unwrap();
        assert_eq!(
            result.outcome,
            SelectionOutcome::Selected("feature/a".to_string())
        );
        assert!(result.changes.is_empty());
        assert!(screen.contains("search: FEAT"), "screen:\n{screen}");
    }

    #[test]
    fn test_escape_cancels() {
        let events = ScriptedEvents::default().key(KeyCode::Down).key(KeyCode::Esc);
        let (result, _) = run(
            request(&["main", "dev"], &[]),
            &PickerOptions::default(),
            events,
            &NoopPinStore,
        );
        assert_eq!(result.unwrap().outcome, SelectionOutcome::Cancelled);
    }

    #[test]
    fn test_ctrl_c_cancels() {
        let events = ScriptedEvents::default().ctrl('c');
        let (result, _) = run(
            request(&["main"], &[]),
            &PickerOptions::default(),
            events,
            &NoopPinStore,
        );
        assert_eq!(result.unwrap().outcome, SelectionOutcome::Cancelled);
    }

    #[test]
    fn test_enter_on_empty_list_keeps_running() {
        let events = ScriptedEvents::default()
            .text("zzz")
            .key(KeyCode::Enter)
            .key(KeyCode::Backspace)
            .key(KeyCode::Backspace)
            .key(KeyCode::Backspace)
            .key(KeyCode::Enter);
        let (result, _) = run(
            request(&["main", "dev"], &[]),
            &PickerOptions::default(),
            events,
            &NoopPinStore,
        );
        assert_eq!(
            result.unwrap().outcome,
            SelectionOutcome::Selected("main".to_string())
        );
    }

    #[test]
    fn test_pin_through_store() {
        let store = RecordingPinStore::default();
        let events = ScriptedEvents::default()
            .key(KeyCode::Down)
            .key(KeyCode::Down)
            .ctrl('d')
            .key(KeyCode::Enter);
        let (result, _) = run(
            request(&["main", "dev", "topic"], &[]),
            &PickerOptions::default(),
            events,
            &store,
        );
        let result = result.unwrap();
        // The pinned label moves to the top and stays selected
        assert_eq!(result.outcome, SelectionOutcome::Selected("topic".to_string()));
        assert_eq!(result.pinned, vec!["topic".to_string()]);
        assert_eq!(result.changes, vec![PinChange::Pinned("topic".to_string())]);
        assert_eq!(*store.calls.borrow(), result.changes);
    }

    #[test]
    fn test_pin_failure_is_shown_and_session_continues() {
        let store = RecordingPinStore::failing("disk full");
        let events = ScriptedEvents::default().ctrl('d').key(KeyCode::Esc);
        let (result, screen) = run(
            request(&["main", "dev"], &[]),
            &PickerOptions::default(),
            events,
            &store,
        );
        let result = result.unwrap();
        assert_eq!(result.outcome, SelectionOutcome::Cancelled);
        assert!(result.pinned.is_empty());
        assert!(result.changes.is_empty());
        assert!(
            screen.contains("Error: Failed to pin main: disk full"),
            "screen:\n{screen}"
        );
    }

    #[test]
    fn test_unmapped_key_clears_error() {
        let store = RecordingPinStore::failing("disk full");
        let events = ScriptedEvents::default()
            .ctrl('d')
            .key(KeyCode::F(5))
            .key(KeyCode::Esc);
        let (_, screen) = run(
            request(&["main"], &[]),
            &PickerOptions::default(),
            events,
            &store,
        );
        assert!(!screen.contains("Error:"), "screen:\n{screen}");
    }

    #[test]
    fn test_pin_keys_ignored_when_pinning_disabled() {
        let store = RecordingPinStore::default();
        let options = PickerOptions {
            features: FeaturesConfig {
                pinning: false,
                current_branch: true,
            },
            ..PickerOptions::default()
        };
        let events = ScriptedEvents::default().ctrl('d').key(KeyCode::Enter);
        let (result, screen) = run(request(&["main", "dev"], &[]), &options, events, &store);
        assert!(result.unwrap().changes.is_empty());
        assert!(store.calls.borrow().is_empty());
        assert!(!screen.contains("CTRL+D"));
    }

    #[test]
    fn test_release_events_are_ignored() {
        let release = Event::Key(KeyEvent {
            code: KeyCode::Char('x'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        let events = ScriptedEvents::default()
            .event(release)
            .event(Event::Resize(40, 10))
            .key(KeyCode::Enter);
        let (result, _) = run(
            request(&["main", "dev"], &[]),
            &PickerOptions::default(),
            events,
            &NoopPinStore,
        );
        assert_eq!(
            result.unwrap().outcome,
            SelectionOutcome::Selected("main".to_string())
        );
    }

    #[test]
    fn test_event_source_failure_is_fatal() {
        let events = ScriptedEvents::default().text("ma");
        let (result, _) = run(
            request(&["main"], &[]),
            &PickerOptions::default(),
            events,
            &NoopPinStore,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_draw_failure_keeps_io_error_as_source() {
        let mut terminal = Terminal::new(BrokenPipeBackend).unwrap();
        let err = run_selection(
            &mut terminal,
            &mut ScriptedEvents::default().key(KeyCode::Enter),
            request(&["main"], &[]),
            &PickerOptions::default(),
            &NoopPinStore,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "failed to draw picker");
        let io_err = err.root_cause().downcast_ref::<io::Error>().unwrap();
        assert_eq!(io_err.kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn test_full_screen_layout() {
        let events = ScriptedEvents::default().text("e").key(KeyCode::Esc);
        let (_, screen) = run(
            request(&["main", "dev", "feature", "release", "hotfix"], &["release"]),
            &PickerOptions::default(),
            events,
            &NoopPinStore,
        );
        let rows: Vec<&str> = screen.lines().collect();
        assert_eq!(
            rows[0],
            "CTRL+D: Pin Selected Branch, CTRL+U: Unpin Selected Branch"
        );
        assert_eq!(rows[1], "");
        assert_eq!(rows[2], "checked out: main");
        assert_eq!(rows[3], "");
        assert_eq!(rows[4], "search: e");
        assert_eq!(rows[5], "");
        // Pinned match first, then the others in original order
        assert_eq!(rows[6], "★ release");
        assert_eq!(rows[7], "dev");
        assert_eq!(rows[8], "feature");
        assert_eq!(rows[9], "");
    }

    #[test]
    fn test_header_hidden_by_feature_flag() {
        let options = PickerOptions {
            features: FeaturesConfig {
                pinning: true,
                current_branch: false,
            },
            search_label: "branch".to_string(),
            ..PickerOptions::default()
        };
        let events = ScriptedEvents::default().key(KeyCode::Esc);
        let (_, screen) = run(request(&["main"], &[]), &options, events, &NoopPinStore);
        assert!(!screen.contains("checked out"));
        assert!(screen.contains("branch:"));
    }
}

use anyhow::{Context, Result};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use std::collections::VecDeque;

/// Blocking source of terminal events for the picker loop.
pub trait EventSource {
    fn next_event(&mut self) -> Result<Event>;
}

/// Reads events from the real terminal.
pub struct CrosstermEvents;

impl EventSource for CrosstermEvents {
    fn next_event(&mut self) -> Result<Event> {
        crossterm::event::read().context("failed to read terminal event")
    }
}

/// Replays a fixed list of events, then fails once exhausted.
#[derive(Debug, Default)]
pub struct ScriptedEvents {
    events: VecDeque<Event>,
}

impl ScriptedEvents {
    pub fn key(mut self, code: KeyCode) -> Self {
        self.events
            .push_back(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
        self
    }

    pub fn ctrl(mut self, c: char) -> Self {
        self.events.push_back(Event::Key(KeyEvent::new(
            KeyCode::Char(c),
            KeyModifiers::CONTROL,
        )));
        self
    }

    /// Queue one key press per character.
    pub fn text(mut self, text: &str) -> Self {
        for c in text.chars() {
            self = self.key(KeyCode::Char(c));
        }
        self
    }

    pub fn event(mut self, event: Event) -> Self {
        self.events.push_back(event);
        self
    }
}

impl EventSource for ScriptedEvents {
    fn next_event(&mut self) -> Result<Event> {
        self.events
            .pop_front()
            .context("no more terminal events")
    }
}

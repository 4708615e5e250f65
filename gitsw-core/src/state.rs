use crate::{
    action::Action,
    matcher,
    pins::{PinChange, PinRegistry, PinStore},
    window,
};
use unicode_segmentation::UnicodeSegmentation;

pub const DEFAULT_WINDOW_SIZE: usize = 10;

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionOutcome {
    Selected(String),
    Cancelled,
}

/// Everything needed to start a session.
#[derive(Debug, Clone)]
pub struct SelectionRequest {
    pub candidates: Vec<String>,
    pub pinned: Vec<String>,
    /// Shown as a header line only; never affects selection.
    pub current: Option<String>,
    pub window_size: usize,
}

impl SelectionRequest {
    pub fn new(candidates: Vec<String>) -> Self {
        Self {
            candidates,
            pinned: Vec::new(),
            current: None,
            window_size: DEFAULT_WINDOW_SIZE,
        }
    }
}

/// What the caller gets back once the session is over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionResult {
    pub outcome: SelectionOutcome,
    pub pinned: Vec<String>,
    pub changes: Vec<PinChange>,
}

/// Where the selection should land after the visible list is rebuilt.
enum Anchor {
    /// Keep the current index (clamped).
    Index,
    /// Follow a label to wherever it moved, falling back to the index.
    Label(String),
}

/// Mutable state of one picker session. Every transition leaves the selection
/// inside the visible list and the window around the selection.
#[derive(Debug, Clone)]
pub struct SelectionState {
    candidates: Vec<String>,
    pins: PinRegistry,
    current: Option<String>,
    window_size: usize,

    pub input: String,
    pub visible: Vec<String>,
    pub selected: usize,
    pub window_start: usize,
    pub outcome: Option<SelectionOutcome>,
    /// Recoverable failure shown until the next key press
    pub error: Option<String>,
}

impl SelectionState {
    pub fn new(request: SelectionRequest) -> Self {
        let pins = PinRegistry::new(request.pinned);
        let visible = matcher::filter(&request.candidates, pins.pinned(), "");
        Self {
            candidates: request.candidates,
            pins,
            current: request.current,
            window_size: request.window_size.max(1),
            input: String::new(),
            visible,
            selected: 0,
            window_start: 0,
            outcome: None,
            error: None,
        }
    }

    pub fn is_done(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn pins(&self) -> &PinRegistry {
        &self.pins
    }

    pub fn is_pinned(&self, label: &str) -> bool {
        self.pins.is_pinned(label)
    }

    pub fn selected_label(&self) -> Option<&str> {
        self.visible.get(self.selected).map(String::as_str)
    }

    /// Rows currently inside the viewport, with their absolute indices.
    pub fn window(&self) -> impl Iterator<Item = (usize, &str)> {
        let range = window::visible_range(self.window_start, self.window_size, self.visible.len());
        range
            .clone()
            .zip(self.visible[range].iter().map(String::as_str))
    }

    /// Apply one action, then rebuild the visible list and re-anchor the
    /// selection and window. Store failures during pin/unpin are recorded in
    /// `error` and do not end the session.
    pub fn apply(&mut self, action: Action, store: &dyn PinStore) {
        if self.is_done() {
            return;
        }
        self.error = None;

        let anchor = match action {
            Action::Cancel => {
                self.outcome = Some(SelectionOutcome::Cancelled);
                Anchor::Index
            }
            Action::Confirm => {
                if let Some(label) = self.selected_label() {
                    self.outcome = Some(SelectionOutcome::Selected(label.to_string()));
                }
                Anchor::Index
            }
            Action::SearchPush(c) => {
                self.input.push(c);
                self.reset_position();
                Anchor::Index
            }
            Action::SearchPop => {
                if let Some((idx, _)) = self.input.grapheme_indices(true).next_back() {
                    self.input.truncate(idx);
                    self.reset_position();
                }
                Anchor::Index
            }
            Action::MoveSelection(delta) => {
                self.move_selection(delta);
                Anchor::Index
            }
            Action::PageUp => {
                self.move_selection(-self.page_delta());
                Anchor::Index
            }
            Action::PageDown => {
                self.move_selection(self.page_delta());
                Anchor::Index
            }
            Action::MoveTop => {
                self.selected = 0;
                Anchor::Index
            }
            Action::MoveBottom => {
                self.selected = self.visible.len().saturating_sub(1);
                Anchor::Index
            }
            Action::Pin => self.pin_selected(store),
            Action::Unpin => self.unpin_selected(store),
        };

        self.refresh(anchor);
    }

    /// Hand the pinned set and change log back to the caller.
    pub fn into_result(self) -> Option<SelectionResult> {
        let outcome = self.outcome?;
        let (pinned, changes) = self.pins.into_parts();
        Some(SelectionResult {
            outcome,
            pinned,
            changes,
        })
    }

    fn reset_position(&mut self) {
        self.selected = 0;
        self.window_start = 0;
    }

    fn page_delta(&self) -> i32 {
        i32::try_from(self.window_size).unwrap_or(i32::MAX)
    }

    fn move_selection(&mut self, delta: i32) {
        let len = self.visible.len();
        if len == 0 {
            return;
        }
        let step = delta.unsigned_abs() as usize;
        self.selected = if delta > 0 {
            self.selected.saturating_add(step).min(len - 1)
        } else {
            self.selected.saturating_sub(step)
        };
        if self.selected < self.window_start {
            self.window_start = self.selected;
        } else if self.selected >= self.window_start + self.window_size {
            self.window_start = self.selected + 1 - self.window_size;
        }
    }

    fn pin_selected(&mut self, store: &dyn PinStore) -> Anchor {
        let Some(label) = self.selected_label().map(str::to_string) else {
            return Anchor::Index;
        };
        match self.pins.pin(&label, store) {
            Ok(_) => Anchor::Label(label),
            Err(e) => {
                self.error = Some(format!("Failed to pin {label}: {e:#}"));
                Anchor::Index
            }
        }
    }

    fn unpin_selected(&mut self, store: &dyn PinStore) -> Anchor {
        let Some(label) = self.selected_label().map(str::to_string) else {
            return Anchor::Index;
        };
        // Stay in place: pick the neighbour in the old order before the list moves.
        let neighbour = self
            .visible
            .get(self.selected + 1)
            .or_else(|| self.selected.checked_sub(1).and_then(|i| self.visible.get(i)))
            .cloned();
        match self.pins.unpin(&label, store) {
            Ok(true) => neighbour.map_or(Anchor::Index, Anchor::Label),
            Ok(false) => Anchor::Index,
            Err(e) => {
                self.error = Some(format!("Failed to unpin {label}: {e:#}"));
                Anchor::Index
            }
        }
    }

    fn refresh(&mut self, anchor: Anchor) {
        self.visible = matcher::filter(&self.candidates, self.pins.pinned(), &self.input);

        if let Anchor::Label(label) = anchor
            && let Some(idx) = self.visible.iter().position(|v| *v == label)
        {
            self.selected = idx;
        }
        self.selected = self.selected.min(self.visible.len().saturating_sub(1));
        self.window_start = window::reconcile(
            self.selected,
            self.window_start,
            self.window_size,
            self.visible.len(),
        );
    }
}

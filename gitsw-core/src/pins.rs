use anyhow::Result;
use std::cell::RefCell;

/// Storage side-effects for pin/unpin, invoked synchronously before a change
/// is considered committed.
pub trait PinStore {
    fn persist_pin(&self, label: &str) -> Result<()>;
    fn persist_unpin(&self, label: &str) -> Result<()>;
}

/// Store for sessions that persist from the returned change log instead.
pub struct NoopPinStore;

impl PinStore for NoopPinStore {
    fn persist_pin(&self, _label: &str) -> Result<()> {
        Ok(())
    }

    fn persist_unpin(&self, _label: &str) -> Result<()> {
        Ok(())
    }
}

/// A committed pin operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PinChange {
    Pinned(String),
    Unpinned(String),
}

/// The session's own copy of the pinned set, plus a log of every change that
/// made it to the store.
#[derive(Debug, Clone, Default)]
pub struct PinRegistry {
    pinned: Vec<String>,
    log: Vec<PinChange>,
}

impl PinRegistry {
    pub fn new(pinned: Vec<String>) -> Self {
        let mut unique = Vec::with_capacity(pinned.len());
        for label in pinned {
            if !unique.contains(&label) {
                unique.push(label);
            }
        }
        Self {
            pinned: unique,
            log: Vec::new(),
        }
    }

    pub fn pinned(&self) -> &[String] {
        &self.pinned
    }

    pub fn is_pinned(&self, label: &str) -> bool {
        self.pinned.iter().any(|p| p == label)
    }

    pub fn changes(&self) -> &[PinChange] {
        &self.log
    }

    /// Pin `label`. Returns `Ok(false)` without touching the store when it is
    /// already pinned. On store failure the set is left exactly as it was.
    pub fn pin(&mut self, label: &str, store: &dyn PinStore) -> Result<bool> {
        if self.is_pinned(label) {
            return Ok(false);
        }

        self.pinned.push(label.to_string());
        if let Err(e) = store.persist_pin(label) {
            self.pinned.pop();
            log::warn!("pin of {label} rolled back: {e:#}");
            return Err(e);
        }

        log::info!("pinned {label}");
        self.log.push(PinChange::Pinned(label.to_string()));
        Ok(true)
    }

    /// Unpin `label`. Returns `Ok(false)` without touching the store when it is
    /// not pinned. On store failure the previous set is restored.
    pub fn unpin(&mut self, label: &str, store: &dyn PinStore) -> Result<bool> {
        let Some(idx) = self.pinned.iter().position(|p| p == label) else {
            return Ok(false);
        };

        let previous = self.pinned.clone();
        self.pinned.remove(idx);
        if let Err(e) = store.persist_unpin(label) {
            self.pinned = previous;
            log::warn!("unpin of {label} rolled back: {e:#}");
            return Err(e);
        }

        log::info!("unpinned {label}");
        self.log.push(PinChange::Unpinned(label.to_string()));
        Ok(true)
    }

    pub fn into_parts(self) -> (Vec<String>, Vec<PinChange>) {
        (self.pinned, self.log)
    }
}

/// Store that records calls and can be told to fail the next one.
#[derive(Default)]
pub struct RecordingPinStore {
    pub calls: RefCell<Vec<PinChange>>,
    pub fail_next: RefCell<Option<String>>,
}

impl RecordingPinStore {
    pub fn failing(message: &str) -> Self {
        Self {
            calls: RefCell::default(),
            fail_next: RefCell::new(Some(message.to_string())),
        }
    }

    fn record(&self, change: PinChange) -> Result<()> {
        self.calls.borrow_mut().push(change);
        match self.fail_next.borrow_mut().take() {
            Some(message) => anyhow::bail!(message),
            None => Ok(()),
        }
    }
}

impl PinStore for RecordingPinStore {
    fn persist_pin(&self, label: &str) -> Result<()> {
        self.record(PinChange::Pinned(label.to_string()))
    }

    fn persist_unpin(&self, label: &str) -> Result<()> {
        self.record(PinChange::Unpinned(label.to_string()))
    }
}

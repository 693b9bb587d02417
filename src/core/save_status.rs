use std::time::{Duration, Instant};

pub const DEFAULT_OK_CLEAR_MS: u64 = 2000;
pub const DEFAULT_ERROR_CLEAR_MS: u64 = 3000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveState {
    Idle,
    Saving,
    Saved,
    Failed(String),
}

/// Transient "saving / saved / save failed" indicator.
///
/// Saved and failed states clear themselves after a fixed delay; callers
/// pass the current instant so the behaviour is deterministic.
#[derive(Debug, Clone)]
pub struct SaveIndicator {
    state: SaveState,
    since: Option<Instant>,
    ok_clear: Duration,
    error_clear: Duration,
}

impl Default for SaveIndicator {
    fn default() -> Self {
        Self::new(
            Duration::from_millis(DEFAULT_OK_CLEAR_MS),
            Duration::from_millis(DEFAULT_ERROR_CLEAR_MS),
        )
    }
}

impl SaveIndicator {
    pub fn new(ok_clear: Duration, error_clear: Duration) -> Self {
        Self {
            state: SaveState::Idle,
            since: None,
            ok_clear,
            error_clear,
        }
    }

    pub fn start(&mut self, now: Instant) {
        self.state = SaveState::Saving;
        self.since = Some(now);
    }

    pub fn succeed(&mut self, now: Instant) {
        self.state = SaveState::Saved;
        self.since = Some(now);
    }

    pub fn fail(&mut self, now: Instant, message: impl ToString) {
        self.state = SaveState::Failed(message.to_string());
        self.since = Some(now);
    }

    /// State as seen at `now`, after auto-clear.
    pub fn current(&self, now: Instant) -> SaveState {
        let elapsed = self
            .since
            .map(|s| now.saturating_duration_since(s))
            .unwrap_or_default();

        match &self.state {
            SaveState::Saved if elapsed >= self.ok_clear => SaveState::Idle,
            SaveState::Failed(_) if elapsed >= self.error_clear => SaveState::Idle,
            other => other.clone(),
        }
    }

    /// Human-readable label, `None` when idle.
    pub fn label(&self, now: Instant) -> Option<String> {
        match self.current(now) {
            SaveState::Idle => None,
            SaveState::Saving => Some("Saving...".to_string()),
            SaveState::Saved => Some("Entry saved!".to_string()),
            SaveState::Failed(msg) => Some(format!("Save failed: {}", msg)),
        }
    }
}

use crate::models::entry::DutyStatusEntry;

pub const DEFAULT_HISTORY_LIMIT: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryAction {
    /// An entry written into its hour slot.
    Add(DutyStatusEntry),
    /// All entries of the day removed.
    Clear,
}

/// Bounded undo/redo log of edit actions.
///
/// `cursor` is the index of the last applied action (`None` = nothing
/// applied). The stack does not own the grid: callers rebuild it by
/// replaying [`HistoryStack::applied`] on top of their baseline.
#[derive(Debug, Clone)]
pub struct HistoryStack {
    actions: Vec<HistoryAction>,
    cursor: Option<usize>,
    limit: usize,
}

impl Default for HistoryStack {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl HistoryStack {
    pub fn new(limit: usize) -> Self {
        Self {
            actions: Vec::new(),
            cursor: None,
            limit: limit.max(1),
        }
    }

    /// Append `action` after the cursor, dropping any redo branch.
    ///
    /// When the stack is full the oldest action is evicted and returned;
    /// the caller must fold it into its baseline so replay stays exact.
    pub fn record(&mut self, action: HistoryAction) -> Option<HistoryAction> {
        let keep = self.cursor.map_or(0, |c| c + 1);
        self.actions.truncate(keep);
        self.actions.push(action);

        let evicted = if self.actions.len() > self.limit {
            Some(self.actions.remove(0))
        } else {
            None
        };

        self.cursor = Some(self.actions.len() - 1);
        evicted
    }

    pub fn can_undo(&self) -> bool {
        self.cursor.is_some()
    }

    pub fn can_redo(&self) -> bool {
        let next = self.cursor.map_or(0, |c| c + 1);
        next < self.actions.len()
    }

    /// Step back one action and return the action being reversed.
    pub fn undo(&mut self) -> Option<&HistoryAction> {
        let current = self.cursor?;
        self.cursor = current.checked_sub(1);
        self.actions.get(current)
    }

    /// Step forward one action and return the action being reapplied.
    pub fn redo(&mut self) -> Option<&HistoryAction> {
        if !self.can_redo() {
            return None;
        }
        let next = self.cursor.map_or(0, |c| c + 1);
        self.cursor = Some(next);
        self.actions.get(next)
    }

    /// Actions up to and including the cursor, oldest first.
    pub fn applied(&self) -> &[HistoryAction] {
        match self.cursor {
            Some(c) => &self.actions[..=c],
            None => &[],
        }
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

use crate::core::grid::{DayLogModel, validate_hour};
use crate::core::history::{HistoryAction, HistoryStack};
use crate::core::projector::{GridBounds, GridCell, project};
use crate::core::save_status::SaveIndicator;
use crate::errors::{AppError, AppResult};
use crate::gateway::PersistenceGateway;
use crate::models::day_log::DayLogRecord;
use crate::models::duty_status::DutyStatus;
use crate::models::entry::DutyStatusEntry;
use crate::models::snapshot::{DayEntries, VisualLogData};
use std::time::Instant;

/// Cell picked on the grid, waiting for location/remarks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingEntry {
    pub hour: u8,
    pub status: DutyStatus,
}

/// Editing state of one daily log: the grid, its undo history, the cell
/// being filled in and the save indicator. Owned by whoever drives the
/// editor; nothing here is shared.
#[derive(Debug, Clone)]
pub struct EditorSession {
    model: DayLogModel,
    history: HistoryStack,
    /// Entries as they were when the session opened, plus any actions
    /// evicted from the bounded history.
    baseline: DayEntries,
    pending: Option<PendingEntry>,
    indicator: SaveIndicator,
}

fn apply_action(entries: &mut DayEntries, action: &HistoryAction) {
    match action {
        HistoryAction::Add(entry) => {
            entries.insert(entry.hour, entry.clone());
        }
        HistoryAction::Clear => entries.clear(),
    }
}

impl EditorSession {
    pub fn new(model: DayLogModel) -> Self {
        Self::with_options(model, HistoryStack::default(), SaveIndicator::default())
    }

    pub fn with_options(model: DayLogModel, history: HistoryStack, indicator: SaveIndicator) -> Self {
        let baseline = model.entries().clone();
        Self {
            model,
            history,
            baseline,
            pending: None,
            indicator,
        }
    }

    pub fn open(record: &DayLogRecord) -> Self {
        Self::new(DayLogModel::from_record(record))
    }

    pub fn model(&self) -> &DayLogModel {
        &self.model
    }

    pub fn history(&self) -> &HistoryStack {
        &self.history
    }

    pub fn pending(&self) -> Option<PendingEntry> {
        self.pending
    }

    pub fn indicator(&self) -> &SaveIndicator {
        &self.indicator
    }

    fn ensure_editable(&self) -> AppResult<()> {
        self.model.status.ensure_editable(&self.model.date_str())
    }

    // ---------------------------
    // Pointer input
    // ---------------------------

    /// Project a pointer position and, when it hits an editable cell,
    /// remember it as the pending entry.
    pub fn pick(&mut self, x: f64, y: f64, bounds: &GridBounds) -> AppResult<Option<GridCell>> {
        self.ensure_editable()?;

        let cell = project(x, y, bounds);
        if let Some(c) = cell {
            self.pending = Some(PendingEntry {
                hour: c.hour,
                status: c.status(),
            });
        }
        Ok(cell)
    }

    /// Select (or adjust) the pending cell by hand.
    pub fn select(&mut self, hour: i32, status: DutyStatus) -> AppResult<()> {
        let hour = validate_hour(hour)?;
        self.ensure_editable()?;
        self.pending = Some(PendingEntry { hour, status });
        Ok(())
    }

    /// Turn the pending cell into an entry with the given details.
    pub fn commit_pending(
        &mut self,
        location: Option<&str>,
        remarks: Option<&str>,
    ) -> AppResult<DutyStatusEntry> {
        let pending = self
            .pending
            .ok_or_else(|| AppError::Validation("no grid cell selected".into()))?;

        let entry = DutyStatusEntry::from_input(
            self.model.date(),
            pending.status,
            pending.hour,
            location,
            remarks,
        );

        self.set_entry(i32::from(pending.hour), entry.clone())?;
        self.pending = None;
        Ok(entry)
    }

    // ---------------------------
    // Edits
    // ---------------------------

    pub fn set_entry(&mut self, hour: i32, entry: DutyStatusEntry) -> AppResult<()> {
        self.model.set_entry(hour, entry)?;

        let applied = self
            .model
            .entry(hour as u8)
            .cloned()
            .ok_or_else(|| AppError::Other(format!("entry for hour {} vanished", hour)))?;
        self.record(HistoryAction::Add(applied));
        Ok(())
    }

    pub fn clear(&mut self) -> AppResult<()> {
        self.model.clear()?;
        self.pending = None;
        self.record(HistoryAction::Clear);
        Ok(())
    }

    fn record(&mut self, action: HistoryAction) {
        if let Some(evicted) = self.history.record(action) {
            apply_action(&mut self.baseline, &evicted);
        }
    }

    /// Step back one edit. Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> AppResult<bool> {
        self.ensure_editable()?;
        if self.history.undo().is_none() {
            return Ok(false);
        }
        self.rebuild();
        Ok(true)
    }

    /// Reapply the next undone edit. Returns `false` when there is none.
    pub fn redo(&mut self) -> AppResult<bool> {
        self.ensure_editable()?;
        if self.history.redo().is_none() {
            return Ok(false);
        }
        self.rebuild();
        Ok(true)
    }

    /// Recompute the grid: baseline + every action up to the cursor.
    fn rebuild(&mut self) {
        let mut entries = self.baseline.clone();
        for action in self.history.applied() {
            apply_action(&mut entries, action);
        }
        self.model.restore_entries(entries);
    }

    pub fn snapshot(&self) -> VisualLogData {
        self.model.to_snapshot()
    }

    // ---------------------------
    // Remote sync
    // ---------------------------

    /// Push the current snapshot. A failure keeps the local edits and
    /// flags the indicator; the error is returned for reporting.
    pub async fn save(&mut self, gateway: &dyn PersistenceGateway) -> AppResult<()> {
        self.indicator.start(Instant::now());

        match gateway.save_visual_data(self.model.id, &self.snapshot()).await {
            Ok(()) => {
                self.indicator.succeed(Instant::now());
                Ok(())
            }
            Err(e) => {
                self.indicator.fail(Instant::now(), &e);
                Err(e)
            }
        }
    }

    /// Save the current grid, then certify it. The local state only moves
    /// to certified once the service accepted the certification.
    pub async fn certify(&mut self, gateway: &dyn PersistenceGateway) -> AppResult<()> {
        let target = self.model.date_str();
        self.model.status.ensure_certifiable(&target)?;

        self.save(gateway).await?;
        gateway.certify(self.model.id).await?;

        self.model.status.certify(&target)?;
        self.pending = None;
        Ok(())
    }
}

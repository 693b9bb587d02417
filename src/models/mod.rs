pub mod day_log;
pub mod duty_status;
pub mod entry;
pub mod snapshot;
pub mod status_change;
pub mod trip;

pub mod certification;
pub mod export;
pub mod generator;
pub mod grid;
pub mod history;
pub mod log;
pub mod log_set;
pub mod projector;
pub mod save_status;
pub mod session;

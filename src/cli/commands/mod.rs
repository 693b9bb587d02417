pub mod certify;
pub mod config;
pub mod del;
pub mod edit;
pub mod export;
pub mod generate;
pub mod init;
pub mod list;
pub mod log;
pub mod show;
pub mod trip;

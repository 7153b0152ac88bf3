pub mod attendance;
pub mod backup;
pub mod config;
pub mod db;
pub mod employee;
pub mod export;
pub mod init;
pub mod list;
pub mod location;
pub mod log;

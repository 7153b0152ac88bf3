pub mod attendance;
pub mod backup;
pub mod employee;
pub mod export;
pub mod geofence;
pub mod list;
pub mod location;
pub mod log;

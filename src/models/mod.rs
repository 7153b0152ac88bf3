pub mod attendance;
pub mod context;
pub mod coords;
pub mod employee;
pub mod location;

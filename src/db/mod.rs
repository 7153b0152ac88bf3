pub mod employees;
pub mod initialize;
pub mod locations;
pub mod log;
pub mod migrate;
pub mod pool;
pub mod queries;
pub mod stats;

pub mod memory_driver;
pub mod raw_api;
pub mod raw_status;
pub mod static_driver;

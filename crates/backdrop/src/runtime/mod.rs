pub mod mount;
pub mod runner;
pub mod scheduler;

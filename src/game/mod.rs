pub mod runner;
pub mod scoring;
pub mod session;
pub mod timer;

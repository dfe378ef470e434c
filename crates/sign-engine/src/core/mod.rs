pub mod engine;
pub mod queue;
pub mod rng;
pub mod state;
pub mod timer;
pub mod watchdog;

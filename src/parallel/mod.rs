pub mod processor;

pub use processor::{PoolConfig, RunMode, TaskOutcome, TaskScheduler};

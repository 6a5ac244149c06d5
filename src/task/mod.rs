//! Scheduled background tasks
//!
//! Provides the cancellable periodic runner behind the monitor poller

mod scheduled;

pub use scheduled::{Flow, ScheduledTask, TaskStatus};

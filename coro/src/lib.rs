//! Cooperative round-robin task scheduler.
//!
//! Tasks are explicit state machines: each [`Task`] keeps its own resumption
//! point and runs from it until it hands control back with [`Step::Yield`]
//! (re-queued at the tail) or [`Step::Finish`] (dropped). The [`Scheduler`]
//! is the trampoline that pops the head of the ready queue and resumes it
//! until nothing is runnable. All shared state lives in the scheduler's
//! context value, which only the running task can touch.
//!
//! ```
//! use coro::{from_fn, Scheduler, Step, TaskArg};
//!
//! let mut sched = Scheduler::new(0u32);
//! for name in ["ping", "pong"] {
//!     sched.register(TaskArg::new(name), |_| {
//!         Box::new(from_fn(|turns: &mut u32| {
//!             if *turns == 6 {
//!                 return Step::Finish;
//!             }
//!             *turns += 1;
//!             Step::Yield
//!         }))
//!     });
//! }
//! let summary = sched.run().unwrap();
//! assert_eq!(*sched.context(), 6);
//! assert_eq!(summary.finished, ["ping", "pong"]);
//! ```

pub mod queue;
pub mod scheduler;
pub mod task;

pub use queue::ReadyQueue;
pub use scheduler::{RunSummary, Scheduler, SchedulerError};
pub use task::{from_fn, Entry, FnTask, Step, Task, TaskArg, TaskRecord};

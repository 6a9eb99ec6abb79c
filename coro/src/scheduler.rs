use std::collections::TryReserveError;

use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::{
    queue::ReadyQueue,
    task::{Entry, Step, Task, TaskArg, TaskRecord},
};

#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("ready queue could not grow: {0}")]
    Alloc(#[from] TryReserveError),
}

/// What a finished [`Scheduler::run`] observed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub dispatches: u64,
    /// Task names in the order they finished.
    pub finished: Vec<String>,
}

struct Spawn<C> {
    arg: TaskArg,
    entry: Entry<C>,
}

/// Round-robin trampoline over a FIFO of [`Task`]s sharing one context.
pub struct Scheduler<C> {
    registry: Vec<Spawn<C>>,
    ready: ReadyQueue<TaskRecord<C>>,
    ctx: C,
    summary: RunSummary,
}

impl<C> Scheduler<C> {
    pub fn new(ctx: C) -> Self {
        Self {
            registry: Vec::new(),
            ready: ReadyQueue::new(),
            ctx,
            summary: RunSummary::default(),
        }
    }

    /// Adds a task to the registry. `entry` is not called until
    /// [`Scheduler::start`].
    pub fn register<E>(&mut self, arg: TaskArg, entry: E)
    where
        E: FnOnce(&TaskArg) -> Box<dyn Task<C>> + 'static,
    {
        self.registry.push(Spawn {
            arg,
            entry: Box::new(entry),
        });
    }

    /// First pass: invokes every registered entry once, in registration
    /// order, and queues the tasks they produce. None of them has done any
    /// work yet when this returns.
    pub fn start(&mut self) -> Result<(), SchedulerError> {
        for Spawn { arg, entry } in self.registry.drain(..) {
            let task = entry(&arg);
            trace!(task = %arg.name, "registered");
            self.ready.push_back(TaskRecord::new(arg.name, task))?;
        }
        Ok(())
    }

    /// Resumes the head of the ready queue once. Returns `None` when no
    /// task is runnable. The running task is held here, outside the queue,
    /// until it yields or finishes.
    pub fn dispatch(&mut self) -> Result<Option<Step>, SchedulerError> {
        let Some(mut current) = self.ready.pop_front() else {
            return Ok(None);
        };
        let step = current.resume(&mut self.ctx);
        self.summary.dispatches += 1;
        trace!(task = current.name(), ?step, "dispatched");

        match step {
            Step::Yield => {
                if let Err(err) = self.ready.reserve(1) {
                    warn!(task = current.name(), %err, "ready queue full, dropping task");
                    return Err(err.into());
                }
                self.ready.push_back(current)?;
            }
            Step::Finish => {
                debug!(
                    task = current.name(),
                    dispatches = current.dispatches(),
                    "task finished"
                );
                self.summary.finished.push(current.name().to_owned());
            }
        }
        Ok(Some(step))
    }

    /// Starts any registered tasks and dispatches until the ready queue is
    /// empty.
    pub fn run(&mut self) -> Result<RunSummary, SchedulerError> {
        self.start()?;
        while self.dispatch()?.is_some() {}
        debug!(dispatches = self.summary.dispatches, "ready queue empty");
        Ok(std::mem::take(&mut self.summary))
    }

    /// Names of the queued tasks, head first.
    pub fn ready_names(&self) -> Vec<&str> {
        self.ready.iter().map(TaskRecord::name).collect()
    }

    pub fn context(&self) -> &C {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut C {
        &mut self.ctx
    }

    pub fn into_context(self) -> C {
        self.ctx
    }
}

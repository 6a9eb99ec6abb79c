use std::fmt;

/// How a task hands control back to the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Re-queue at the tail of the ready queue; the next dispatch resumes
    /// right after this point.
    Yield,
    /// Never dispatch this task again.
    Finish,
}

/// A resumable unit of work. Implementors store their own resumption point
/// and pick up from it on every call to [`Task::resume`].
pub trait Task<C> {
    fn resume(&mut self, ctx: &mut C) -> Step;
}

/// A task backed by a closure; the closure's captured state is its
/// resumption point.
pub struct FnTask<F>(F);

pub fn from_fn<C, F>(f: F) -> FnTask<F>
where
    F: FnMut(&mut C) -> Step,
{
    FnTask(f)
}

impl<C, F> Task<C> for FnTask<F>
where
    F: FnMut(&mut C) -> Step,
{
    fn resume(&mut self, ctx: &mut C) -> Step {
        (self.0)(ctx)
    }
}

/// Argument handed to an entry routine when the scheduler registers it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskArg {
    pub name: String,
}

impl TaskArg {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Builds a task positioned before its real work.
pub type Entry<C> = Box<dyn FnOnce(&TaskArg) -> Box<dyn Task<C>>>;

pub struct TaskRecord<C> {
    name: String,
    task: Box<dyn Task<C>>,
    dispatches: u64,
}

impl<C> TaskRecord<C> {
    pub fn new(name: impl Into<String>, task: Box<dyn Task<C>>) -> Self {
        Self {
            name: name.into(),
            task,
            dispatches: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Times this task has been resumed.
    pub fn dispatches(&self) -> u64 {
        self.dispatches
    }

    pub(crate) fn resume(&mut self, ctx: &mut C) -> Step {
        self.dispatches += 1;
        self.task.resume(ctx)
    }
}

impl<C> fmt::Debug for TaskRecord<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskRecord")
            .field("name", &self.name)
            .field("dispatches", &self.dispatches)
            .finish_non_exhaustive()
    }
}

use std::collections::{vec_deque, TryReserveError, VecDeque};

/// FIFO of tasks eligible to run next.
#[derive(Debug)]
pub struct ReadyQueue<T> {
    tasks: VecDeque<T>,
}

impl<T> Default for ReadyQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ReadyQueue<T> {
    pub fn new() -> Self {
        Self {
            tasks: VecDeque::new(),
        }
    }

    pub fn reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        self.tasks.try_reserve(additional)
    }

    /// Appends at the tail, failing instead of aborting when the queue
    /// cannot grow.
    pub fn push_back(&mut self, task: T) -> Result<(), TryReserveError> {
        self.tasks.try_reserve(1)?;
        self.tasks.push_back(task);
        Ok(())
    }

    pub fn pop_front(&mut self) -> Option<T> {
        self.tasks.pop_front()
    }

    pub fn front(&self) -> Option<&T> {
        self.tasks.front()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn iter(&self) -> vec_deque::Iter<'_, T> {
        self.tasks.iter()
    }
}

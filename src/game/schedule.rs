use std::time::Duration;

/// Handle of a deferred session task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(pub u64);

/// Host clock for deferred work.
///
/// The session asks for `id` to be fired once after `delay`; the host then calls
/// [`GameSession::fire`](super::GameSession::fire). `cancel` must stop a task that
/// has not fired yet; cancelling an unknown or already fired id is a no-op.
pub trait Scheduler {
    fn schedule(&mut self, id: TaskId, delay: Duration);
    fn cancel(&mut self, id: TaskId);
}

#[derive(Clone, Copy, Debug)]
struct Entry {
    due: Duration,
    seq: u64,
    id: TaskId,
}

/// Virtual-clock scheduler. Nothing fires on its own; drive it with
/// [`GameSession::advance`](super::GameSession::advance).
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    seq: u64,
    queue: Vec<Entry>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }

    pub fn is_scheduled(&self, id: TaskId) -> bool {
        self.queue.iter().any(|entry| entry.id == id)
    }

    pub fn next_due(&self) -> Option<Duration> {
        self.queue.iter().map(|entry| entry.due).min()
    }

    /// Removes the earliest task due at or before `until` and moves the clock
    /// to its due time. Ties fire in scheduling order.
    pub fn pop_due(&mut self, until: Duration) -> Option<TaskId> {
        let (pos, entry) = self
            .queue
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.due <= until)
            .min_by_key(|(_, entry)| (entry.due, entry.seq))
            .map(|(pos, entry)| (pos, *entry))?;
        self.queue.remove(pos);
        self.now = self.now.max(entry.due);
        Some(entry.id)
    }

    pub fn set_now(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, id: TaskId, delay: Duration) {
        self.seq += 1;
        self.queue.push(Entry {
            due: self.now + delay,
            seq: self.seq,
            id,
        });
    }

    fn cancel(&mut self, id: TaskId) {
        self.queue.retain(|entry| entry.id != id);
    }
}

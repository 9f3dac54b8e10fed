use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::time::Duration;
use toybox_common::{Color, ObjectHandle};

/// Delayed one-shot work scheduled by an effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTask {
    /// Put an object's pre-flash color back.
    RestoreColor { handle: ObjectHandle, color: Color },
    /// Drop bounce state from every object in the scene.
    ClearBounce,
}

#[derive(Debug)]
struct Entry {
    deadline: Duration,
    seq: u64,
    task: TimerTask,
}

// Heap order is (deadline, seq) only; `seq` is unique so payloads never tie-break.
impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        (self.deadline, self.seq) == (other.deadline, other.seq)
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.deadline, self.seq).cmp(&(other.deadline, other.seq))
    }
}

/// Single-threaded queue of one-shot timers.
///
/// Tasks come out in deadline order; tasks sharing a deadline come out in
/// the order they were scheduled. Nothing can be cancelled.
#[derive(Debug, Default)]
pub struct TimerQueue {
    heap: BinaryHeap<Reverse<Entry>>,
    next_seq: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, deadline: Duration, task: TimerTask) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(Entry {
            deadline,
            seq,
            task,
        }));
    }

    /// Pop the earliest task whose deadline is at or before `now`.
    pub fn pop_due(&mut self, now: Duration) -> Option<TimerTask> {
        let Reverse(head) = self.heap.peek()?;
        if head.deadline > now {
            return None;
        }
        self.heap.pop().map(|Reverse(entry)| entry.task)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.heap.peek().map(|Reverse(e)| e.deadline)
    }
}

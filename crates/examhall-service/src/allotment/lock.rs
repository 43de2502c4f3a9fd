//! Per-exam serialization of regeneration.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

use examhall_core::types::ExamId;

/// Keyed async mutexes, one per exam id.
///
/// Two `generate` calls for the same exam run one after the other; calls
/// for different exams do not contend.
#[derive(Debug, Default)]
pub struct ExamLocks {
    locks: DashMap<ExamId, Arc<Mutex<()>>>,
}

impl ExamLocks {
    /// Creates an empty lock table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for exclusive access to an exam. Held until the guard drops.
    pub async fn acquire(&self, exam_id: ExamId) -> ExamLockGuard<'_> {
        let lock = self
            .locks
            .entry(exam_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let guard = lock.lock_owned().await;
        ExamLockGuard {
            exam_id,
            locks: &self.locks,
            guard: Some(guard),
        }
    }
}

/// Exclusive access to one exam.
///
/// Dropping the guard releases the exam and removes its table entry once
/// no other caller holds or waits on it.
#[derive(Debug)]
pub struct ExamLockGuard<'a> {
    exam_id: ExamId,
    locks: &'a DashMap<ExamId, Arc<Mutex<()>>>,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for ExamLockGuard<'_> {
    fn drop(&mut self) {
        // The owned guard keeps its own Arc; release it before counting.
        drop(self.guard.take());
        self.locks
            .remove_if(&self.exam_id, |_, lock| Arc::strong_count(lock) == 1);
    }
}

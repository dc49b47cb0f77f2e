//! Screen-scoped task ownership
//!
//! Each screen owns a [`TaskScope`] for the requests it fires. Dropping the
//! scope aborts everything still in flight, so a response can never mutate
//! state after its owning screen is gone.

use std::future::Future;
use tokio::task::JoinHandle;
use tracing::debug;

/// Owns spawned tasks and aborts them on drop
#[derive(Debug, Default)]
pub struct TaskScope {
    handles: Vec<JoinHandle<()>>,
}

impl TaskScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn a task owned by this scope
    pub fn spawn<F>(&mut self, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.handles.retain(|h| !h.is_finished());
        self.handles.push(tokio::spawn(future));
    }

    /// Number of tasks not yet finished
    pub fn outstanding(&self) -> usize {
        self.handles.iter().filter(|h| !h.is_finished()).count()
    }

    /// Abort every owned task and discard its result
    pub fn abort_all(&mut self) {
        let aborted = self.outstanding();
        for handle in self.handles.drain(..) {
            handle.abort();
        }
        if aborted > 0 {
            debug!(aborted, "aborted in-flight tasks");
        }
    }
}

impl Drop for TaskScope {
    fn drop(&mut self) {
        self.abort_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_drop_aborts_in_flight_task() {
        let completed = Arc::new(AtomicBool::new(false));

        {
            let mut scope = TaskScope::new();
            let flag = completed.clone();
            scope.spawn(async move {
                tokio::time::sleep(Duration::from_secs(1)).await;
                flag.store(true, Ordering::SeqCst);
            });
        }

        // Well past the task's sleep; it must not have run to completion
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(!completed.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn test_completed_task_result_is_kept() {
        let completed = Arc::new(AtomicBool::new(false));
        let mut scope = TaskScope::new();

        let flag = completed.clone();
        scope.spawn(async move {
            flag.store(true, Ordering::SeqCst);
        });

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(completed.load(Ordering::SeqCst));
        assert_eq!(scope.outstanding(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_abort_all_clears_outstanding() {
        let mut scope = TaskScope::new();
        for _ in 0..3 {
            scope.spawn(async {
                tokio::time::sleep(Duration::from_secs(60)).await;
            });
        }
        assert_eq!(scope.outstanding(), 3);

        scope.abort_all();
        assert_eq!(scope.outstanding(), 0);
    }
}

//! Command-completion pipeline with exactly-once detachment.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::{Arc, Weak};
use tether_core::{CommandId, Lifecycle, SubscriberId};
use tracing::{debug, trace};

use crate::task::CommandTask;

/// Tracks in-flight command tasks through an injected
/// [`Lifecycle`] sink.
///
/// For every posted task the pipeline subscribes to the task's
/// completion signal *before* invoking `attach`, and on completion it
/// unsubscribes *before* invoking `detach`. The in-flight token map is
/// the exactly-once gate: the first completion removes the token, so a
/// spurious second fire finds nothing to do.
///
/// Subscription closures hold only weak references — to the pipeline
/// and to the task — so a task that never completes cannot keep the
/// pipeline alive, and a task's own signal never forms a reference
/// cycle through the task.
pub struct CommandPipeline {
    sink: Arc<dyn Lifecycle<CommandTask>>,
    inflight: Mutex<HashMap<CommandId, SubscriberId>>,
    weak_self: Weak<Self>,
}

impl CommandPipeline {
    /// Create a pipeline draining into `sink`.
    pub fn new(sink: Arc<dyn Lifecycle<CommandTask>>) -> Arc<Self> {
        Arc::new_cyclic(|weak_self| Self {
            sink,
            inflight: Mutex::new(HashMap::new()),
            weak_self: weak_self.clone(),
        })
    }

    /// Track a task: subscribe to its completion signal, then attach it
    /// to the sink.
    ///
    /// The in-flight lock is held across the subscribe/insert pair: a
    /// completion delivered from another thread in that window blocks in
    /// [`finish`](Self::finish) until the token is recorded, so it can
    /// never slip past an empty map and leave the task tracked forever.
    /// The signal's own lock is released before callbacks run, so this
    /// cannot deadlock.
    pub fn post(&self, task: &Arc<CommandTask>) {
        {
            let mut inflight = self.inflight.lock();
            let weak_pipeline = self.weak_self.clone();
            let weak_task = Arc::downgrade(task);
            let token = task.completed().subscribe(move |_| {
                let (Some(pipeline), Some(task)) = (weak_pipeline.upgrade(), weak_task.upgrade())
                else {
                    return;
                };
                pipeline.finish(&task);
            });
            let _ = inflight.insert(task.id().clone(), token);
        }
        debug!(command = %task.id(), "command task posted");
        self.sink.attach(task);
    }

    /// Number of tasks currently tracked as in-flight.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.inflight.lock().len()
    }

    /// Completion path: exactly-once unsubscribe-then-detach.
    fn finish(&self, task: &Arc<CommandTask>) {
        let token = self.inflight.lock().remove(task.id());
        let Some(token) = token else {
            trace!(command = %task.id(), "completion for task no longer in flight");
            return;
        };
        // Unsubscribe before the detach hook runs, so a re-entrant or
        // repeated completion can never detach twice.
        let _ = task.completed().unsubscribe(token);
        debug!(command = %task.id(), "command task completed");
        self.sink.detach(task);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tether_core::FnLifecycle;

    type SinkLog = Arc<Mutex<Vec<String>>>;

    fn recording_sink(log: &SinkLog) -> Arc<dyn Lifecycle<CommandTask>> {
        let attach_log = Arc::clone(log);
        let detach_log = Arc::clone(log);
        Arc::new(FnLifecycle::new(
            move |task: &CommandTask| attach_log.lock().push(format!("attach {}", task.id())),
            move |task: &CommandTask| {
                // By the time detach runs, the pipeline's transient
                // subscription must already be gone.
                assert_eq!(task.completed().subscriber_count(), 0);
                detach_log.lock().push(format!("detach {}", task.id()));
            },
        ))
    }

    #[test]
    fn post_attaches_after_subscribing() {
        let log: SinkLog = Arc::new(Mutex::new(Vec::new()));
        let pipeline = CommandPipeline::new(recording_sink(&log));
        let task = Arc::new(CommandTask::with_id(CommandId::from("c1")));

        pipeline.post(&task);
        assert_eq!(*log.lock(), vec!["attach c1"]);
        assert_eq!(pipeline.in_flight(), 1);
        // The pipeline's transient subscription is live until completion
        assert_eq!(task.completed().subscriber_count(), 1);
    }

    #[test]
    fn completion_detaches_exactly_once() {
        let log: SinkLog = Arc::new(Mutex::new(Vec::new()));
        let pipeline = CommandPipeline::new(recording_sink(&log));
        let task = Arc::new(CommandTask::with_id(CommandId::from("c1")));

        pipeline.post(&task);
        assert!(task.complete());
        assert_eq!(*log.lock(), vec!["attach c1", "detach c1"]);
        assert_eq!(pipeline.in_flight(), 0);
        assert_eq!(task.completed().subscriber_count(), 0);
    }

    #[test]
    fn spurious_second_fire_is_ignored() {
        let log: SinkLog = Arc::new(Mutex::new(Vec::new()));
        let pipeline = CommandPipeline::new(recording_sink(&log));
        let task = Arc::new(CommandTask::with_id(CommandId::from("c1")));

        pipeline.post(&task);
        assert!(task.complete());
        // Simulate the event source misbehaving and firing again: the
        // pipeline unsubscribed, so nothing reaches it.
        task.completed().emit(task.id());
        assert_eq!(*log.lock(), vec!["attach c1", "detach c1"]);
    }

    #[test]
    fn tracks_multiple_tasks_independently() {
        let log: SinkLog = Arc::new(Mutex::new(Vec::new()));
        let pipeline = CommandPipeline::new(recording_sink(&log));
        let first = Arc::new(CommandTask::with_id(CommandId::from("c1")));
        let second = Arc::new(CommandTask::with_id(CommandId::from("c2")));

        pipeline.post(&first);
        pipeline.post(&second);
        assert_eq!(pipeline.in_flight(), 2);

        assert!(second.complete());
        assert_eq!(pipeline.in_flight(), 1);
        assert!(first.complete());
        assert_eq!(pipeline.in_flight(), 0);
        assert_eq!(
            *log.lock(),
            vec!["attach c1", "attach c2", "detach c2", "detach c1"]
        );
    }

    #[test]
    fn completion_after_pipeline_dropped_is_safe() {
        let log: SinkLog = Arc::new(Mutex::new(Vec::new()));
        let pipeline = CommandPipeline::new(recording_sink(&log));
        let task = Arc::new(CommandTask::with_id(CommandId::from("c1")));

        pipeline.post(&task);
        drop(pipeline);
        // The subscription holds only a weak pipeline reference
        assert!(task.complete());
        assert_eq!(*log.lock(), vec!["attach c1"]);
    }

    #[test]
    fn task_signal_holds_no_strong_task_reference() {
        let log: SinkLog = Arc::new(Mutex::new(Vec::new()));
        let pipeline = CommandPipeline::new(recording_sink(&log));
        let task = Arc::new(CommandTask::with_id(CommandId::from("c1")));

        pipeline.post(&task);
        // Only the test's own Arc keeps the task alive: the pipeline's
        // subscription must not form a cycle through the task's signal.
        assert_eq!(Arc::strong_count(&task), 1);
    }

    #[test]
    fn completion_racing_post_detaches_exactly_once() {
        // A completion delivered the instant the subscription exists —
        // possibly before post has recorded the token — must still end
        // with the task untracked and detached exactly once.
        for _ in 0..50 {
            let log: SinkLog = Arc::new(Mutex::new(Vec::new()));
            let pipeline = CommandPipeline::new(recording_sink(&log));
            let task = Arc::new(CommandTask::with_id(CommandId::from("c1")));

            let racer_task = Arc::clone(&task);
            let racer = std::thread::spawn(move || {
                while racer_task.completed().subscriber_count() == 0 {
                    std::thread::yield_now();
                }
                racer_task.complete()
            });

            pipeline.post(&task);
            assert!(racer.join().unwrap());

            {
                let log = log.lock();
                assert_eq!(log.iter().filter(|l| l.as_str() == "attach c1").count(), 1);
                assert_eq!(log.iter().filter(|l| l.as_str() == "detach c1").count(), 1);
            }
            assert_eq!(pipeline.in_flight(), 0);
            assert_eq!(task.completed().subscriber_count(), 0);
        }
    }

    #[test]
    fn completion_from_another_thread_detaches_once() {
        let log: SinkLog = Arc::new(Mutex::new(Vec::new()));
        let pipeline = CommandPipeline::new(recording_sink(&log));
        let task = Arc::new(CommandTask::with_id(CommandId::from("c1")));
        pipeline.post(&task);

        let worker_task = Arc::clone(&task);
        let handle = std::thread::spawn(move || worker_task.complete());
        assert!(handle.join().unwrap());
        assert_eq!(*log.lock(), vec!["attach c1", "detach c1"]);
        assert_eq!(pipeline.in_flight(), 0);
    }
}

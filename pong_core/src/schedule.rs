//! Deferred actions (serve delay and winner announcement)
//!
//! Every task carries the generation that was current when it was scheduled.
//! Starting a new serve or a new match bumps the matching generation, so a
//! task that comes due afterwards is dropped instead of clobbering newer state.

use crate::Side;

/// What to do when a task comes due
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TaskKind {
    /// Launch the parked ball; `direction` is the sign of the new `dx`
    ResumeServe { direction: f32 },
    /// Tell the players who won, then start a new match
    AnnounceWinner { winner: Side },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Task {
    pub due_ms: f64,
    pub generation: u64,
    pub kind: TaskKind,
}

/// Pending deferred tasks plus the generations that keep them honest
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    now_ms: f64,
    serve_generation: u64,
    match_generation: u64,
    pending: Vec<Task>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Host time as of the latest frame
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Schedule a serve, superseding any serve still waiting
    pub fn schedule_serve(&mut self, delay_ms: f64, direction: f32) {
        self.serve_generation += 1;
        self.pending.push(Task {
            due_ms: self.now_ms + delay_ms,
            generation: self.serve_generation,
            kind: TaskKind::ResumeServe { direction },
        });
    }

    /// Schedule the end-of-match announcement for the current match
    pub fn schedule_announcement(&mut self, delay_ms: f64, winner: Side) {
        self.pending.push(Task {
            due_ms: self.now_ms + delay_ms,
            generation: self.match_generation,
            kind: TaskKind::AnnounceWinner { winner },
        });
    }

    /// Start a new match; announcements for earlier matches become no-ops
    pub fn invalidate_match(&mut self) {
        self.match_generation += 1;
    }

    /// Move the clock forward to the host's frame time
    pub fn advance(&mut self, now_ms: f64) {
        // Host clocks are monotonic, but never let time run backwards here
        self.now_ms = self.now_ms.max(now_ms);
    }

    /// Remove and return the earliest live task that is due.
    ///
    /// Liveness is checked at the moment of popping, so a task that fires
    /// and resets state makes any older task still waiting in the queue stale.
    pub fn pop_due(&mut self) -> Option<TaskKind> {
        loop {
            let now = self.now_ms;
            let index = self
                .pending
                .iter()
                .enumerate()
                .filter(|(_, task)| task.due_ms <= now)
                .min_by(|(_, a), (_, b)| a.due_ms.total_cmp(&b.due_ms))
                .map(|(index, _)| index)?;

            let task = self.pending.remove(index);
            if self.is_live(&task) {
                return Some(task.kind);
            }
            tracing::debug!(kind = ?task.kind, generation = task.generation, "dropping stale task");
        }
    }

    /// Advance to `now_ms` and drain every live task that is due, oldest first
    pub fn take_due(&mut self, now_ms: f64) -> Vec<TaskKind> {
        self.advance(now_ms);
        std::iter::from_fn(|| self.pop_due()).collect()
    }

    /// A serve is scheduled and has not fired yet
    pub fn serve_pending(&self) -> bool {
        self.pending.iter().any(|task| {
            matches!(task.kind, TaskKind::ResumeServe { .. }) && self.is_live(task)
        })
    }

    /// Number of live announcements waiting to fire
    pub fn pending_announcements(&self) -> usize {
        self.pending
            .iter()
            .filter(|task| {
                matches!(task.kind, TaskKind::AnnounceWinner { .. }) && self.is_live(task)
            })
            .count()
    }

    fn is_live(&self, task: &Task) -> bool {
        match task.kind {
            TaskKind::ResumeServe { .. } => task.generation == self.serve_generation,
            TaskKind::AnnounceWinner { .. } => task.generation == self.match_generation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_fires_only_when_due() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_serve(500.0, 1.0);

        assert!(scheduler.take_due(499.0).is_empty());
        assert!(scheduler.serve_pending());

        let fired = scheduler.take_due(500.0);
        assert_eq!(fired, vec![TaskKind::ResumeServe { direction: 1.0 }]);
        assert!(!scheduler.serve_pending());
        assert!(scheduler.take_due(2000.0).is_empty(), "Tasks fire once");
    }

    #[test]
    fn test_newer_serve_supersedes_pending_one() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_serve(500.0, -1.0);

        scheduler.take_due(300.0);
        scheduler.schedule_serve(500.0, 1.0);

        // The first serve would have fired at 500
        assert!(scheduler.take_due(500.0).is_empty());
        assert!(scheduler.serve_pending());

        let fired = scheduler.take_due(800.0);
        assert_eq!(fired, vec![TaskKind::ResumeServe { direction: 1.0 }]);
    }

    #[test]
    fn test_invalidated_match_drops_announcement() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_announcement(100.0, Side::Left);
        assert_eq!(scheduler.pending_announcements(), 1);

        scheduler.invalidate_match();
        assert_eq!(scheduler.pending_announcements(), 0);
        assert!(scheduler.take_due(1000.0).is_empty());
    }

    #[test]
    fn test_due_tasks_fire_in_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_announcement(100.0, Side::Right);
        scheduler.schedule_serve(50.0, -1.0);

        let fired = scheduler.take_due(200.0);
        assert_eq!(
            fired,
            vec![
                TaskKind::ResumeServe { direction: -1.0 },
                TaskKind::AnnounceWinner {
                    winner: Side::Right
                },
            ]
        );
    }

    #[test]
    fn test_pop_due_rechecks_liveness() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_announcement(50.0, Side::Left);
        scheduler.schedule_serve(80.0, -1.0);
        scheduler.advance(100.0);

        assert_eq!(
            scheduler.pop_due(),
            Some(TaskKind::AnnounceWinner { winner: Side::Left })
        );

        // Handling the announcement starts a fresh serve
        scheduler.schedule_serve(500.0, 1.0);
        assert_eq!(scheduler.pop_due(), None, "Older serve is stale");
        assert!(scheduler.serve_pending());
    }

    #[test]
    fn test_clock_never_runs_backwards() {
        let mut scheduler = Scheduler::new();
        scheduler.take_due(1000.0);
        scheduler.take_due(10.0);
        assert_eq!(scheduler.now_ms(), 1000.0);
    }
}

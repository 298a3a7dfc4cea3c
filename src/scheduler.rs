//! Cooperative delayed actions, advanced by `tick` from the frame loop.

use alloc::vec::Vec;
use core::time::Duration;

/// Deferred work the session controller knows how to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ScheduledAction {
    AiMove,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct DelayedAction {
    pub action: ScheduledAction,
    pub elapsed: Duration,
    pub delay: Duration,
}

impl DelayedAction {
    /// Fraction of the delay that has passed, capped at `1.0`.
    pub fn progress(&self) -> f32 {
        if self.delay.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f32() / self.delay.as_secs_f32()).min(1.0)
    }

    pub fn is_due(&self) -> bool {
        self.elapsed >= self.delay
    }
}

/// Effect produced by a tick, in queue order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SchedulerEvent {
    /// A pending action advanced; `fraction` is in `0.0..=1.0`.
    Progress {
        action: ScheduledAction,
        fraction: f32,
    },
    /// The action's deadline passed and it was removed from the queue.
    Fire(ScheduledAction),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Scheduler {
    pending: Vec<DelayedAction>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, action: ScheduledAction, delay: Duration) {
        log::trace!("Scheduled {:?} in {:?}", action, delay);
        self.pending.push(DelayedAction {
            action,
            elapsed: Duration::ZERO,
            delay,
        });
    }

    /// Advance every pending action by `delta`. Each action reports progress;
    /// due actions additionally fire and are dropped.
    pub fn tick(&mut self, delta: Duration) -> Vec<SchedulerEvent> {
        let mut events = Vec::new();
        self.pending.retain_mut(|pending| {
            pending.elapsed = pending.elapsed.saturating_add(delta);
            events.push(SchedulerEvent::Progress {
                action: pending.action,
                fraction: pending.progress(),
            });
            if pending.is_due() {
                log::trace!("Firing {:?}", pending.action);
                events.push(SchedulerEvent::Fire(pending.action));
                false
            } else {
                true
            }
        });
        events
    }

    /// Drop pending entries for `action`. Returns how many were removed.
    pub fn cancel(&mut self, action: ScheduledAction) -> usize {
        let before = self.pending.len();
        self.pending.retain(|pending| pending.action != action);
        before - self.pending.len()
    }

    /// Drop everything pending, e.g. before starting a new game.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn pending(&self) -> &[DelayedAction] {
        &self.pending
    }
}

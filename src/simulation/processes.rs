//! Timers driving the periodic processes and deferred per-agent actions
//!
//! Everything advances from the scheduler's tick; nothing runs on its own.

use super::types::{AgentId, TripId};

/// Fires once every `interval` seconds of simulated time
#[derive(Debug, Clone)]
pub struct PeriodicTimer {
    interval: f32,
    elapsed: f32,
}

impl PeriodicTimer {
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            elapsed: 0.0,
        }
    }

    pub fn set_interval(&mut self, interval: f32) {
        self.interval = interval;
    }

    /// Advance by `delta_secs`; returns how many times the timer fired
    pub fn advance(&mut self, delta_secs: f32) -> u32 {
        if self.interval <= 0.0 {
            return 0;
        }
        self.elapsed += delta_secs;
        let mut fired = 0;
        while self.elapsed >= self.interval {
            self.elapsed -= self.interval;
            fired += 1;
        }
        fired
    }
}

/// The three periodic processes, running or stopped as a unit
#[derive(Debug, Clone)]
pub struct ProcessTimers {
    pub spawn: PeriodicTimer,
    pub despawn: PeriodicTimer,
    pub leaving: PeriodicTimer,
}

impl ProcessTimers {
    pub fn new(spawn_pause: f32, despawn_pause: f32, leaving_pause: f32) -> Self {
        Self {
            spawn: PeriodicTimer::new(spawn_pause),
            despawn: PeriodicTimer::new(despawn_pause),
            leaving: PeriodicTimer::new(leaving_pause),
        }
    }
}

/// Actions scheduled to run on an agent after a delay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredKind {
    DisablePhysics,
}

#[derive(Debug, Clone)]
pub struct DeferredAction {
    pub agent: AgentId,
    /// Trip the action was scheduled for; stale once the agent is reused
    pub trip: TripId,
    pub kind: DeferredKind,
    pub remaining: f32,
}

#[derive(Debug, Default)]
pub struct DeferredQueue {
    pending: Vec<DeferredAction>,
}

impl DeferredQueue {
    pub fn schedule(&mut self, agent: AgentId, trip: TripId, kind: DeferredKind, delay: f32) {
        self.pending.push(DeferredAction {
            agent,
            trip,
            kind,
            remaining: delay,
        });
    }

    /// Advance all pending actions; returns the ones now due
    pub fn advance(&mut self, delta_secs: f32) -> Vec<DeferredAction> {
        for action in &mut self.pending {
            action.remaining -= delta_secs;
        }
        let (due, pending): (Vec<_>, Vec<_>) = self
            .pending
            .drain(..)
            .partition(|a| a.remaining <= 0.0);
        self.pending = pending;
        due
    }

    /// Drop everything scheduled for `agent`
    pub fn cancel_agent(&mut self, agent: AgentId) {
        self.pending.retain(|a| a.agent != agent);
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_fires_on_interval() {
        let mut timer = PeriodicTimer::new(1.0);
        assert_eq!(timer.advance(0.5), 0);
        assert_eq!(timer.advance(0.5), 1);
        assert_eq!(timer.advance(2.5), 2);
        assert_eq!(timer.advance(0.5), 1);
    }

    #[test]
    fn test_deferred_actions_due_and_cancel() {
        let mut queue = DeferredQueue::default();
        queue.schedule(AgentId(1), TripId(1), DeferredKind::DisablePhysics, 0.5);
        queue.schedule(AgentId(2), TripId(2), DeferredKind::DisablePhysics, 0.5);
        queue.cancel_agent(AgentId(2));

        assert!(queue.advance(0.25).is_empty());
        let due = queue.advance(0.25);
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].agent, AgentId(1));
        assert!(queue.is_empty());
    }
}

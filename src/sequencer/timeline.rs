//! Sequence lifecycle state machine

use serde::{Deserialize, Serialize};

/// Where a running sequence is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SequencePhase {
    /// Announcing en garde
    #[default]
    Init,
    /// Emitting mode commands
    Running,
    /// Announcing halte
    Terminating,
    Ended,
}

/// Events that move the timeline forward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimelineTrigger {
    ReadyDone,
    ModeFinished,
    Cancelled,
    HaltSent,
}

impl SequencePhase {
    /// Next phase for a trigger. Triggers that do not apply leave the phase unchanged.
    pub fn apply(self, trigger: TimelineTrigger) -> SequencePhase {
        use SequencePhase::*;
        use TimelineTrigger::*;

        match (self, trigger) {
            (Init, ReadyDone) => Running,
            (Init, Cancelled) => Terminating,
            (Running, ModeFinished) => Terminating,
            (Running, Cancelled) => Terminating,
            (Terminating, HaltSent) => Ended,
            _ => self,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, SequencePhase::Ended)
    }
}

/// Tracks the phase of one sequence and logs each transition
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    phase: SequencePhase,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SequencePhase {
        self.phase
    }

    pub fn advance(&mut self, trigger: TimelineTrigger) -> SequencePhase {
        let next = self.phase.apply(trigger);
        if next != self.phase {
            tracing::debug!("Timeline {:?} -> {:?} ({:?})", self.phase, next, trigger);
            self.phase = next;
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use SequencePhase::*;
    use TimelineTrigger::*;

    #[test]
    fn test_happy_path() {
        let mut timeline = Timeline::new();
        assert_eq!(timeline.phase(), Init);
        assert_eq!(timeline.advance(ReadyDone), Running);
        assert_eq!(timeline.advance(ModeFinished), Terminating);
        assert_eq!(timeline.advance(HaltSent), Ended);
        assert!(timeline.phase().is_finished());
    }

    #[test]
    fn test_cancel_during_ready_skips_running() {
        assert_eq!(Init.apply(Cancelled), Terminating);
    }

    #[test]
    fn test_ended_is_terminal() {
        for trigger in [ReadyDone, ModeFinished, Cancelled, HaltSent] {
            assert_eq!(Ended.apply(trigger), Ended);
        }
    }

    #[test]
    fn test_irrelevant_trigger_is_ignored() {
        assert_eq!(Running.apply(HaltSent), Running);
        assert_eq!(Terminating.apply(Cancelled), Terminating);
    }
}

//! Events handed to the streaming layer

use serde::{Deserialize, Serialize};

use crate::commands::CommandPayload;

/// Interval phase name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Work,
    Rest,
}

/// Status metadata relayed with each command
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rep: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_reps: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_secs: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_sets: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<Phase>,
}

impl Progress {
    pub fn repetition(rep: u32, total: u32) -> Self {
        Self {
            rep: Some(rep),
            total_reps: Some(total),
            ..Default::default()
        }
    }

    pub fn remaining(secs: u64) -> Self {
        Self {
            remaining_secs: Some(secs),
            remaining: Some(format_remaining(secs)),
            ..Default::default()
        }
    }

    pub fn interval(set: u32, total_sets: u32, phase: Phase, remaining_secs: u64) -> Self {
        Self {
            set: Some(set),
            total_sets: Some(total_sets),
            phase: Some(phase),
            ..Self::remaining(remaining_secs)
        }
    }
}

/// `m:ss`
pub fn format_remaining(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DrillEvent {
    /// Opening "en garde"
    Ready { command: CommandPayload },
    Command { command: CommandPayload, progress: Progress },
    /// Start of a rest phase
    Rest { set: u32, total_sets: u32, seconds: u64 },
    /// One second of rest; progress carries the rest phase
    Countdown { remaining: u64, progress: Progress },
    /// Closing "halte", sent exactly once
    Halt { command: CommandPayload },
    End { completed: bool },
}

impl DrillEvent {
    /// The command id for command-bearing events
    pub fn command_id(&self) -> Option<crate::core::types::CommandId> {
        match self {
            DrillEvent::Ready { command }
            | DrillEvent::Command { command, .. }
            | DrillEvent::Halt { command } => Some(command.id),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DrillEvent::Ready { .. } => "ready",
            DrillEvent::Command { .. } => "command",
            DrillEvent::Rest { .. } => "rest",
            DrillEvent::Countdown { .. } => "countdown",
            DrillEvent::Halt { .. } => "halt",
            DrillEvent::End { .. } => "end",
        }
    }
}

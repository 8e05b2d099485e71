// Pure timer state machine.
//
// Two states: Idle and Running(project, start). Transitions never perform
// input or output; the handler persists the next state and turns a
// completed span into a time entry.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveTimer {
    pub project_id: String,
    pub start_time: i64,
}

impl ActiveTimer {
    pub fn elapsed_ms(&self, now: i64) -> i64 {
        (now - self.start_time).max(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    Running(ActiveTimer),
}

impl From<Option<ActiveTimer>> for TimerState {
    fn from(timer: Option<ActiveTimer>) -> Self {
        match timer {
            Some(timer) => TimerState::Running(timer),
            None => TimerState::Idle,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerCommand {
    Start { project_id: String },
    Stop,
    Clear,
}

/// Work captured by a stopped timer, ready to become a time entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedSpan {
    pub project_id: String,
    pub start_time: i64,
    pub end_time: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerDecision {
    pub next: TimerState,
    pub completed: Option<CompletedSpan>,
}

pub fn decide(state: &TimerState, command: TimerCommand, now: i64) -> TimerDecision {
    match command {
        TimerCommand::Start { project_id } => TimerDecision {
            next: TimerState::Running(ActiveTimer {
                project_id,
                start_time: now,
            }),
            completed: complete(state, now),
        },
        TimerCommand::Stop => TimerDecision {
            next: TimerState::Idle,
            completed: complete(state, now),
        },
        TimerCommand::Clear => TimerDecision {
            next: TimerState::Idle,
            completed: None,
        },
    }
}

fn complete(state: &TimerState, now: i64) -> Option<CompletedSpan> {
    match state {
        TimerState::Idle => None,
        TimerState::Running(timer) => Some(CompletedSpan {
            project_id: timer.project_id.clone(),
            start_time: timer.start_time,
            end_time: now.max(timer.start_time),
        }),
    }
}

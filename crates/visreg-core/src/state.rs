//! Pure session lifecycle state machine
//!
//! No I/O and no async: the coordinator performs the remote calls and feeds
//! their outcomes in as events. Invalid transitions land in `Failed`
//! instead of panicking.

/// Per-scenario session state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// No session activity for the current scenario
    Idle,
    /// Gate passed, remote open call in flight
    Opening,
    /// Remote session is open, commands are installed
    Open,
    /// Remote close call in flight
    Closing,
    /// Remote open failed; replacement failing commands are installed
    Failed { error: String },
}

/// Events that drive session state transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A new scenario begins; any prior state is discarded
    ScenarioStarted,
    /// Gate declined instrumentation for this scenario
    GateSkipped,
    /// Gate passed, the open call is being issued
    OpenRequested,
    /// Remote session opened successfully
    OpenSucceeded,
    /// Remote session open failed
    OpenFailed { error: String },
    /// Scenario ended, the close call is being issued
    CloseRequested,
    /// Close call finished (successfully or not — the session is gone)
    CloseFinished,
}

/// Pure state transition function. Never panics.
pub fn transition(state: SessionState, event: SessionEvent) -> SessionState {
    match (state, event) {
        // A new scenario always resets, including out of Failed
        (_, SessionEvent::ScenarioStarted) => SessionState::Idle,

        (SessionState::Idle, SessionEvent::GateSkipped) => SessionState::Idle,
        (SessionState::Idle, SessionEvent::OpenRequested) => SessionState::Opening,

        (SessionState::Opening, SessionEvent::OpenSucceeded) => SessionState::Open,
        (SessionState::Opening, SessionEvent::OpenFailed { error }) => {
            SessionState::Failed { error }
        }

        (SessionState::Open, SessionEvent::CloseRequested) => SessionState::Closing,
        (SessionState::Closing, SessionEvent::CloseFinished) => SessionState::Idle,

        // End-hook gate skip and end-of-scenario in Failed/Idle are no-ops
        (state @ SessionState::Failed { .. }, SessionEvent::GateSkipped) => state,
        (state @ SessionState::Failed { .. }, SessionEvent::CloseRequested) => state,

        (state, event) => SessionState::Failed {
            error: format!(
                "invalid session transition: {:?} cannot handle {:?}",
                state, event
            ),
        },
    }
}

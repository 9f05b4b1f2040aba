use std::fmt;

/// Lifecycle of the polling loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PollState {
    /// No process attached; attach attempts are rate-limited
    #[default]
    Disconnected,
    /// An attach attempt is in progress
    Connecting,
    /// Attached; every tick produces a snapshot
    Active,
}

impl fmt::Display for PollState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PollState::Disconnected => write!(f, "Disconnected"),
            PollState::Connecting => write!(f, "Connecting"),
            PollState::Active => write!(f, "Active"),
        }
    }
}

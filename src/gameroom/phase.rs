/// Coordinator lifecycle.
///
/// ```text
/// Dealing ─► Running ◄─► Reshuffling
///               ▲ │
///               │ ├────► ArbitratingClaim ─► Running
///               │ ▼
///             Ending ─► Terminated
/// ```
///
/// Any live phase may jump straight to `Terminated` on an external stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Dealing,
    Running,
    Reshuffling,
    ArbitratingClaim,
    Ending,
    Terminated,
}

impl Phase {
    /// Whether the coordinator may move from `self` to `next`.
    pub fn allows(&self, next: Phase) -> bool {
        use Phase::*;
        match (self, next) {
            (Terminated, _) => false,
            (_, Terminated) => true,
            (Dealing, Running) => true,
            (Running, Reshuffling | ArbitratingClaim | Ending) => true,
            (Reshuffling | ArbitratingClaim, Running) => true,
            _ => false,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Phase::Dealing => write!(f, "dealing"),
            Phase::Running => write!(f, "running"),
            Phase::Reshuffling => write!(f, "reshuffling"),
            Phase::ArbitratingClaim => write!(f, "arbitrating"),
            Phase::Ending => write!(f, "ending"),
            Phase::Terminated => write!(f, "terminated"),
        }
    }
}

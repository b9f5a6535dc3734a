/// Why the engine stopped fetching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HaltReason {
    /// `HLT` was fetched.
    HaltInstruction,
    /// The program counter advanced past the last memory address.
    EndOfMemory,
}

/// Execution-state machine for the fetch-decode-execute loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RunState {
    /// Ready to fetch the next instruction.
    #[default]
    Running,
    /// Terminal; no further instructions are fetched.
    Halted(HaltReason),
}

impl RunState {
    /// Returns the halt reason, if halted.
    #[must_use]
    pub const fn halt_reason(self) -> Option<HaltReason> {
        match self {
            Self::Halted(reason) => Some(reason),
            Self::Running => None,
        }
    }

    /// Returns `true` while instructions are still being fetched.
    #[must_use]
    pub const fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }
}

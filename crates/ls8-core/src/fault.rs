use thiserror::Error;

/// Fault classes used for diagnostics and exit reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaultClass {
    /// Memory address outside the 256-byte address space.
    Memory,
    /// Register index outside `R0..R7`.
    Register,
    /// Stack pointer left the representable byte range.
    Stack,
    /// ALU helper invoked with an operation it does not implement.
    Alu,
}

/// Fatal interpreter faults.
///
/// None of these are recoverable: every fault signals either a malformed
/// program that walked off the machine or a defect in the calling code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
pub enum Fault {
    /// Read or write outside `0..=255`.
    #[error("memory address {address:#05X} is outside the 256-byte address space")]
    AddressOutOfRange {
        /// Offending address.
        address: usize,
    },
    /// Register operand outside `R0..R7`.
    #[error("register index {index} is outside R0..R7")]
    RegisterOutOfRange {
        /// Offending register index.
        index: u8,
    },
    /// `POP` or `RET` incremented the stack pointer past `0xFF`.
    #[error("stack pointer incremented past 0xFF")]
    StackPointerOverflow,
    /// ALU selector named an operation other than `ADD` or `CMP`.
    #[error("unsupported ALU operation `{name}`")]
    UnsupportedAluOperation {
        /// Operation name as requested by the caller.
        name: String,
    },
}

impl Fault {
    /// Returns the diagnostics class for this fault.
    #[must_use]
    pub const fn class(&self) -> FaultClass {
        match self {
            Self::AddressOutOfRange { .. } => FaultClass::Memory,
            Self::RegisterOutOfRange { .. } => FaultClass::Register,
            Self::StackPointerOverflow => FaultClass::Stack,
            Self::UnsupportedAluOperation { .. } => FaultClass::Alu,
        }
    }
}

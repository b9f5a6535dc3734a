//! Public host-facing API contracts for embedding the interpreter.

use std::fmt;
use std::io;

use thiserror::Error;

use crate::{Fault, HaltReason, Instruction, GENERAL_REGISTER_COUNT};

/// Top-level immutable configuration for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunConfig {
    /// Enables per-instruction trace dispatch.
    pub tracing_enabled: bool,
}

/// Outcome of a single step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Instruction executed; the machine is still running.
    Retired {
        /// The instruction that executed.
        instruction: Instruction,
    },
    /// The machine is now halted.
    Halted(HaltReason),
}

/// Result of running a program to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Terminal condition that ended the run.
    pub halt_reason: HaltReason,
    /// Instructions executed, not counting the final `HLT`.
    pub instructions_retired: u64,
}

/// Errors that abort a run.
#[derive(Debug, Error)]
pub enum RunError {
    /// The instruction at `pc` faulted.
    #[error("fault at pc {pc:#04X}: {fault}")]
    Fault {
        /// Program counter of the faulting instruction.
        pc: usize,
        /// Fault cause.
        #[source]
        fault: Fault,
    },
    /// Writing `PRN` output failed.
    #[error("failed to write program output: {0}")]
    Output(#[from] io::Error),
}

impl RunError {
    /// Returns the underlying fault, if this error is one.
    #[must_use]
    pub const fn fault(&self) -> Option<&Fault> {
        match self {
            Self::Fault { fault, .. } => Some(fault),
            Self::Output(_) => None,
        }
    }
}

/// Per-instruction trace record, captured after fetch and before execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceEvent {
    /// Program counter of the fetched instruction.
    pub pc: usize,
    /// Bytes at `PC`, `PC+1`, `PC+2`.
    pub bytes: [u8; 3],
    /// Register file before execution.
    pub registers: [u8; GENERAL_REGISTER_COUNT],
}

impl fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [opcode, a, b] = self.bytes;
        write!(f, "TRACE: {:02X} | {opcode:02X} {a:02X} {b:02X} |", self.pc)?;
        for value in self.registers {
            write!(f, " {value:02X}")?;
        }
        Ok(())
    }
}

/// Host-provided trace sink.
pub trait TraceSink {
    /// Records an event in execution order.
    fn on_event(&mut self, event: TraceEvent);
}

/// Trace sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTrace;

impl TraceSink for NoopTrace {
    fn on_event(&mut self, _event: TraceEvent) {}
}

impl TraceSink for Vec<TraceEvent> {
    fn on_event(&mut self, event: TraceEvent) {
        self.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::{RunConfig, RunError, TraceEvent, TraceSink};
    use crate::Fault;

    #[test]
    fn tracing_is_disabled_by_default() {
        assert!(!RunConfig::default().tracing_enabled);
    }

    #[test]
    fn trace_line_uses_two_digit_hex_fields() {
        let event = TraceEvent {
            pc: 0,
            bytes: [0x82, 0x00, 0x08],
            registers: [0, 0, 0, 0, 0, 0, 0, 0xF4],
        };
        assert_eq!(
            event.to_string(),
            "TRACE: 00 | 82 00 08 | 00 00 00 00 00 00 00 F4"
        );
    }

    #[test]
    fn vec_sink_records_in_order() {
        let mut sink: Vec<TraceEvent> = Vec::new();
        for pc in 0..3 {
            sink.on_event(TraceEvent {
                pc,
                bytes: [0; 3],
                registers: [0; 8],
            });
        }
        let pcs: Vec<_> = sink.iter().map(|event| event.pc).collect();
        assert_eq!(pcs, vec![0, 1, 2]);
    }

    #[test]
    fn run_error_exposes_fault_and_pc() {
        let error = RunError::Fault {
            pc: 0xFE,
            fault: Fault::AddressOutOfRange { address: 256 },
        };
        assert_eq!(
            error.fault(),
            Some(&Fault::AddressOutOfRange { address: 256 })
        );
        assert!(error.to_string().starts_with("fault at pc 0xFE: "));
    }
}

//! Core interpreter crate for the LS-8 register machine.

/// Flat 256-byte memory model.
pub mod memory;
pub use memory::{new_address_space, validate_address, LAST_ADDRESS, MEMORY_BYTES};

/// Architectural machine state: memory, registers, `PC`, `FL`.
pub mod state;
pub use state::{
    GeneralRegister, HaltReason, MachineState, RegisterFile, RunState, FLAG_EQUAL, FLAG_GREATER,
    FLAG_LESS, GENERAL_REGISTER_COUNT, STACK_POINTER_INITIAL,
};

/// Fatal fault taxonomy.
pub mod fault;
pub use fault::{Fault, FaultClass};

/// Opcode table and operand-count rule.
pub mod encoding;
pub use encoding::{
    classify_opcode, instruction_len, is_reserved_branch_opcode, operand_count, sets_pc_directly,
    OpcodeEncoding, OPCODE_ENCODING_TABLE, RESERVED_BRANCH_OPCODES,
};

/// Opcode decode into tagged instructions.
pub mod decoder;
pub use decoder::{Decoder, FetchedWindow, Instruction};

/// Host-facing run configuration, outcomes and tracing.
pub mod api;
pub use api::{
    NoopTrace, RunConfig, RunError, RunSummary, StepOutcome, TraceEvent, TraceSink,
};

/// Standalone ALU operation selector.
pub mod alu;
pub use alu::{alu, alu_by_name, AluOp};

/// Fetch-decode-execute engine.
pub mod execute;
pub use execute::{execute_instruction, fetch, run, step_one};

/// Binary-literal program loader.
pub mod loader;
pub use loader::{load_file, parse_program, strip_line, LoadError};

#[cfg(test)]
use proptest as _;

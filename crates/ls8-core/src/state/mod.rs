//! Machine state: memory, register file, program counter and flag byte.
//!
//! This layer carries no instruction semantics. Every accessor is a raw
//! read or write; the execution engine decides what they mean.

/// Register file types and constants.
pub mod registers;
/// Run/halt state machine.
pub mod run_state;

pub use registers::{
    GeneralRegister, RegisterFile, FLAG_EQUAL, FLAG_GREATER, FLAG_LESS, GENERAL_REGISTER_COUNT,
    STACK_POINTER_INITIAL,
};
pub use run_state::{HaltReason, RunState};

use crate::memory::{new_address_space, validate_address, MEMORY_BYTES};
use crate::Fault;

/// Complete LS-8 machine state for one interpreter run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineState {
    memory: [u8; MEMORY_BYTES],
    registers: RegisterFile,
    pc: usize,
    flags: u8,
    run_state: RunState,
}

impl Default for MachineState {
    fn default() -> Self {
        Self {
            memory: new_address_space(),
            registers: RegisterFile::default(),
            pc: 0,
            flags: 0,
            run_state: RunState::Running,
        }
    }
}

impl MachineState {
    /// Creates a reset machine.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a reset machine with `program` copied to address 0.
    ///
    /// # Errors
    ///
    /// Returns [`Fault::AddressOutOfRange`] when `program` is longer than memory.
    pub fn with_program(program: &[u8]) -> Result<Self, Fault> {
        let mut state = Self::default();
        state.load_program(program)?;
        Ok(state)
    }

    /// Copies `program` into memory starting at address 0.
    ///
    /// # Errors
    ///
    /// Returns [`Fault::AddressOutOfRange`] when `program` is longer than memory.
    pub fn load_program(&mut self, program: &[u8]) -> Result<(), Fault> {
        if program.len() > MEMORY_BYTES {
            return Err(Fault::AddressOutOfRange {
                address: program.len() - 1,
            });
        }
        self.memory[..program.len()].copy_from_slice(program);
        Ok(())
    }

    /// Reads the memory cell at `address`.
    ///
    /// # Errors
    ///
    /// Returns [`Fault::AddressOutOfRange`] for `address >= 256`.
    pub fn read(&self, address: usize) -> Result<u8, Fault> {
        Ok(self.memory[validate_address(address)?])
    }

    /// Stores `value` at `address`.
    ///
    /// # Errors
    ///
    /// Returns [`Fault::AddressOutOfRange`] for `address >= 256`.
    pub fn write_memory(&mut self, address: usize, value: u8) -> Result<(), Fault> {
        self.memory[validate_address(address)?] = value;
        Ok(())
    }

    /// Reads the register named by a raw operand byte.
    ///
    /// # Errors
    ///
    /// Returns [`Fault::RegisterOutOfRange`] for `index >= 8`.
    pub fn read_register(&self, index: u8) -> Result<u8, Fault> {
        Ok(self.registers.get(GeneralRegister::try_from(index)?))
    }

    /// Stores `value` into the register named by a raw operand byte.
    ///
    /// # Errors
    ///
    /// Returns [`Fault::RegisterOutOfRange`] for `index >= 8`.
    pub fn write_register(&mut self, index: u8, value: u8) -> Result<(), Fault> {
        self.registers.set(GeneralRegister::try_from(index)?, value);
        Ok(())
    }

    /// Reads a typed register.
    #[must_use]
    pub const fn register(&self, reg: GeneralRegister) -> u8 {
        self.registers.get(reg)
    }

    /// Writes a typed register.
    pub const fn set_register(&mut self, reg: GeneralRegister, value: u8) {
        self.registers.set(reg, value);
    }

    /// All eight registers in index order.
    #[must_use]
    pub const fn registers(&self) -> [u8; GENERAL_REGISTER_COUNT] {
        self.registers.values()
    }

    /// Current stack pointer (`R7`).
    #[must_use]
    pub const fn stack_pointer(&self) -> u8 {
        self.registers.get(GeneralRegister::STACK_POINTER)
    }

    /// Read-only view of the whole address space.
    #[must_use]
    pub const fn memory(&self) -> &[u8; MEMORY_BYTES] {
        &self.memory
    }

    /// Reads the program counter.
    #[must_use]
    pub const fn pc(&self) -> usize {
        self.pc
    }

    /// Writes the program counter.
    pub const fn set_pc(&mut self, value: usize) {
        self.pc = value;
    }

    /// Reads the `FL` byte.
    #[must_use]
    pub const fn flags(&self) -> u8 {
        self.flags
    }

    /// Writes the `FL` byte.
    pub const fn set_flags(&mut self, value: u8) {
        self.flags = value;
    }

    /// Current run state.
    #[must_use]
    pub const fn run_state(&self) -> RunState {
        self.run_state
    }

    /// Replaces the run state.
    pub const fn set_run_state(&mut self, run_state: RunState) {
        self.run_state = run_state;
    }
}

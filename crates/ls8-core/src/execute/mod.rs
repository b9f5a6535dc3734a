//! Fetch-decode-execute pipeline for the LS-8 ISA.
//!
//! Each step:
//! 1. Fetch the opcode at `PC` and the bytes at `PC+1`, `PC+2`
//! 2. Decode into an [`Instruction`]
//! 3. Execute against [`MachineState`]
//! 4. Advance `PC` by the encoded width, unless the opcode owns `PC`
//!
//! The machine halts on `HLT` or once `PC` is past the last address.

mod stack;

use std::io::Write;

use log::{debug, trace, warn};

use crate::encoding::{instruction_len, sets_pc_directly};
use crate::memory::LAST_ADDRESS;
use crate::{
    Decoder, Fault, FetchedWindow, HaltReason, Instruction, MachineState, RunConfig, RunError,
    RunState, RunSummary, StepOutcome, TraceEvent, TraceSink,
};

/// Reads the opcode and both candidate operands at `pc`.
///
/// # Errors
///
/// Returns [`Fault::AddressOutOfRange`] when any of the three bytes lies past
/// the end of memory. Operands are fetched even for zero-operand opcodes.
pub fn fetch(state: &MachineState, pc: usize) -> Result<FetchedWindow, Fault> {
    Ok(FetchedWindow {
        opcode: state.read(pc)?,
        operand_a: state.read(pc + 1)?,
        operand_b: state.read(pc + 2)?,
    })
}

/// Applies one decoded instruction's effect. `PC` advancement is the caller's.
///
/// `HLT` is not handled here; [`step_one`] intercepts it before execution.
///
/// # Errors
///
/// Returns [`RunError::Fault`] for stack or memory faults and
/// [`RunError::Output`] when `PRN` cannot write.
pub fn execute_instruction(
    instruction: &Instruction,
    state: &mut MachineState,
    output: &mut dyn Write,
) -> Result<(), RunError> {
    let pc = state.pc();
    let at = |fault: Fault| RunError::Fault { pc, fault };

    match *instruction {
        Instruction::Hlt | Instruction::Unassigned { .. } => {}
        Instruction::Ldi { reg, value } => state.set_register(reg, value),
        Instruction::Prn { reg } => writeln!(output, "{}", state.register(reg))?,
        Instruction::Mul { a, b } => {
            let product = state.register(a).wrapping_mul(state.register(b));
            state.set_register(a, product);
        }
        Instruction::Add { a, b } => {
            let sum = state.register(a).wrapping_add(state.register(b));
            state.set_register(a, sum);
        }
        Instruction::Push { reg } => stack::push(state, reg).map_err(at)?,
        Instruction::Pop { reg } => stack::pop(state, reg).map_err(at)?,
        Instruction::Call { reg } => stack::call(state, reg).map_err(at)?,
        Instruction::Ret => stack::ret(state).map_err(at)?,
        Instruction::ReservedBranch { opcode } => {
            warn!("reserved branch opcode {opcode:#010b} at pc {pc:#04X} has no handler");
        }
    }

    Ok(())
}

/// Executes exactly one instruction.
///
/// A halted machine stays halted and reports its halt reason again.
///
/// # Errors
///
/// Returns [`RunError`] when fetch, decode or execution faults, or when
/// output cannot be written. The machine is left as it was at the fault.
pub fn step_one(
    state: &mut MachineState,
    config: &RunConfig,
    output: &mut dyn Write,
    trace: &mut dyn TraceSink,
) -> Result<StepOutcome, RunError> {
    if let RunState::Halted(reason) = state.run_state() {
        return Ok(StepOutcome::Halted(reason));
    }

    let pc = state.pc();
    if pc > LAST_ADDRESS {
        debug!("pc {pc:#X} ran past end of memory");
        state.set_run_state(RunState::Halted(HaltReason::EndOfMemory));
        return Ok(StepOutcome::Halted(HaltReason::EndOfMemory));
    }

    let window = fetch(state, pc).map_err(|fault| RunError::Fault { pc, fault })?;

    if config.tracing_enabled {
        trace.on_event(TraceEvent {
            pc,
            bytes: [window.opcode, window.operand_a, window.operand_b],
            registers: state.registers(),
        });
    }

    let instruction = Decoder::decode(window).map_err(|fault| RunError::Fault { pc, fault })?;
    trace!("{pc:#04X}: {instruction}");

    if instruction == Instruction::Hlt {
        state.set_run_state(RunState::Halted(HaltReason::HaltInstruction));
        return Ok(StepOutcome::Halted(HaltReason::HaltInstruction));
    }

    execute_instruction(&instruction, state, output)?;

    if !sets_pc_directly(window.opcode) {
        state.set_pc(state.pc() + instruction_len(window.opcode));
    }

    Ok(StepOutcome::Retired { instruction })
}

/// Steps until the machine halts.
///
/// # Errors
///
/// Propagates the first [`RunError`] from [`step_one`].
pub fn run(
    state: &mut MachineState,
    config: &RunConfig,
    output: &mut dyn Write,
    trace: &mut dyn TraceSink,
) -> Result<RunSummary, RunError> {
    let mut instructions_retired: u64 = 0;

    loop {
        match step_one(state, config, output, trace)? {
            StepOutcome::Retired { .. } => {
                instructions_retired = instructions_retired.saturating_add(1);
            }
            StepOutcome::Halted(halt_reason) => {
                debug!("halted ({halt_reason:?}) after {instructions_retired} instructions");
                return Ok(RunSummary {
                    halt_reason,
                    instructions_retired,
                });
            }
        }
    }
}

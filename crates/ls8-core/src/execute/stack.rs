//! Stack and subroutine instruction bodies.
//!
//! Update order matters when `R7` is itself the operand: `PUSH R7` stores the
//! already-decremented pointer, `POP R7` increments the popped value, and
//! `CALL R7` jumps to the already-decremented pointer.

use crate::{Fault, GeneralRegister, MachineState};

const SP: GeneralRegister = GeneralRegister::STACK_POINTER;

/// `sp = (sp - 1) & 0xFF; R7 = sp; mem[sp] = reg`.
pub(crate) fn push(state: &mut MachineState, reg: GeneralRegister) -> Result<(), Fault> {
    let sp = state.stack_pointer().wrapping_sub(1);
    state.set_register(SP, sp);
    let value = state.register(reg);
    state.write_memory(usize::from(sp), value)
}

/// `reg = mem[sp]; R7 = R7 + 1`, with no wrap on the increment.
pub(crate) fn pop(state: &mut MachineState, reg: GeneralRegister) -> Result<(), Fault> {
    let sp = state.stack_pointer();
    let value = state.read(usize::from(sp))?;
    let base = if reg == SP { value } else { sp };
    let next_sp = base.checked_add(1).ok_or(Fault::StackPointerOverflow)?;

    state.set_register(reg, value);
    state.set_register(SP, next_sp);
    Ok(())
}

/// `R7 = sp - 1; mem[R7] = pc + 1; pc = reg`.
pub(crate) fn call(state: &mut MachineState, reg: GeneralRegister) -> Result<(), Fault> {
    let pc = state.pc();
    let return_slot = pc + 1;
    let return_byte =
        u8::try_from(return_slot).map_err(|_| Fault::AddressOutOfRange {
            address: return_slot,
        })?;

    let sp = state.stack_pointer().wrapping_sub(1);
    state.set_register(SP, sp);
    state.write_memory(usize::from(sp), return_byte)?;
    let target = state.register(reg);
    state.set_pc(usize::from(target));
    Ok(())
}

/// `pc = mem[sp]; R7 = sp + 1`. The caller still applies the one-byte advance.
pub(crate) fn ret(state: &mut MachineState) -> Result<(), Fault> {
    let sp = state.stack_pointer();
    let next_sp = sp.checked_add(1).ok_or(Fault::StackPointerOverflow)?;
    let target = state.read(usize::from(sp))?;

    state.set_register(SP, next_sp);
    state.set_pc(usize::from(target));
    Ok(())
}

//! Standalone ALU operation selector.
//!
//! The execution loop performs `ADD` and `MUL` inline and never routes
//! through here. `CMP` compares the raw index arguments rather than the
//! register contents they name; nothing reads the resulting flags.

use std::str::FromStr;

use crate::{Fault, MachineState, FLAG_EQUAL, FLAG_GREATER, FLAG_LESS};

/// Operations the ALU helper implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AluOp {
    /// `reg[a] += reg[b]`, wrapping.
    Add,
    /// Compare the index arguments and set exactly one `FL` bit.
    Cmp,
}

impl FromStr for AluOp {
    type Err = Fault;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "ADD" => Ok(Self::Add),
            "CMP" => Ok(Self::Cmp),
            other => Err(Fault::UnsupportedAluOperation {
                name: other.to_string(),
            }),
        }
    }
}

/// Applies `op` to the machine.
///
/// # Errors
///
/// `Add` returns [`Fault::RegisterOutOfRange`] for an index outside `R0..R7`.
/// `Cmp` never touches the register file and cannot fail.
pub fn alu(state: &mut MachineState, op: AluOp, reg_a: u8, reg_b: u8) -> Result<(), Fault> {
    match op {
        AluOp::Add => {
            let sum = state
                .read_register(reg_a)?
                .wrapping_add(state.read_register(reg_b)?);
            state.write_register(reg_a, sum)
        }
        AluOp::Cmp => {
            let flags = match reg_a.cmp(&reg_b) {
                std::cmp::Ordering::Equal => FLAG_EQUAL,
                std::cmp::Ordering::Less => FLAG_LESS,
                std::cmp::Ordering::Greater => FLAG_GREATER,
            };
            state.set_flags(flags);
            Ok(())
        }
    }
}

/// Name-based entry point: `"ADD"` or `"CMP"`.
///
/// # Errors
///
/// Returns [`Fault::UnsupportedAluOperation`] for any other name, plus any
/// fault from [`alu`].
pub fn alu_by_name(
    state: &mut MachineState,
    name: &str,
    reg_a: u8,
    reg_b: u8,
) -> Result<(), Fault> {
    alu(state, name.parse()?, reg_a, reg_b)
}

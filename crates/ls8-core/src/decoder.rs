//! Instruction decoder for the LS-8 ISA.
//!
//! Decoding turns a fetched opcode byte and its two prefetched operand bytes
//! into an [`Instruction`]. Register operands are validated here, so every
//! decoded register field is a real register.

use std::fmt;

use crate::encoding::{classify_opcode, is_reserved_branch_opcode, OpcodeEncoding};
use crate::{Fault, GeneralRegister};

/// Raw bytes read at `PC`, `PC+1` and `PC+2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchedWindow {
    /// Opcode byte.
    pub opcode: u8,
    /// First operand byte.
    pub operand_a: u8,
    /// Second operand byte.
    pub operand_b: u8,
}

/// Fully decoded instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// Stop the machine.
    Hlt,
    /// Load an immediate into a register.
    Ldi {
        /// Destination register.
        reg: GeneralRegister,
        /// Immediate byte.
        value: u8,
    },
    /// Print a register in decimal.
    Prn {
        /// Source register.
        reg: GeneralRegister,
    },
    /// `a = a * b`.
    Mul {
        /// Destination and left operand.
        a: GeneralRegister,
        /// Right operand.
        b: GeneralRegister,
    },
    /// `a = a + b`.
    Add {
        /// Destination and left operand.
        a: GeneralRegister,
        /// Right operand.
        b: GeneralRegister,
    },
    /// Push a register onto the stack.
    Push {
        /// Source register.
        reg: GeneralRegister,
    },
    /// Pop the stack into a register.
    Pop {
        /// Destination register.
        reg: GeneralRegister,
    },
    /// Push the return slot and jump to the address held in a register.
    Call {
        /// Register holding the target address.
        reg: GeneralRegister,
    },
    /// Pop the return slot into `PC`.
    Ret,
    /// Branch opcode with no handler; leaves `PC` untouched.
    ReservedBranch {
        /// Raw opcode byte.
        opcode: u8,
    },
    /// Any other byte; executes as a no-op.
    Unassigned {
        /// Raw opcode byte.
        opcode: u8,
    },
}

impl Instruction {
    /// Mnemonic used in logs and traces.
    #[must_use]
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Hlt => OpcodeEncoding::Hlt.mnemonic(),
            Self::Ldi { .. } => OpcodeEncoding::Ldi.mnemonic(),
            Self::Prn { .. } => OpcodeEncoding::Prn.mnemonic(),
            Self::Mul { .. } => OpcodeEncoding::Mul.mnemonic(),
            Self::Add { .. } => OpcodeEncoding::Add.mnemonic(),
            Self::Push { .. } => OpcodeEncoding::Push.mnemonic(),
            Self::Pop { .. } => OpcodeEncoding::Pop.mnemonic(),
            Self::Call { .. } => OpcodeEncoding::Call.mnemonic(),
            Self::Ret => OpcodeEncoding::Ret.mnemonic(),
            Self::ReservedBranch { .. } => "RESERVED",
            Self::Unassigned { .. } => "NOP",
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.mnemonic();
        match *self {
            Self::Hlt | Self::Ret => write!(f, "{name}"),
            Self::Ldi { reg, value } => write!(f, "{name} R{}, {value}", reg.index()),
            Self::Prn { reg } | Self::Push { reg } | Self::Pop { reg } | Self::Call { reg } => {
                write!(f, "{name} R{}", reg.index())
            }
            Self::Mul { a, b } | Self::Add { a, b } => {
                write!(f, "{name} R{}, R{}", a.index(), b.index())
            }
            Self::ReservedBranch { opcode } | Self::Unassigned { opcode } => {
                write!(f, "{name} {opcode:#010b}")
            }
        }
    }
}

/// Instruction decoder for the LS-8 ISA.
pub struct Decoder;

impl Decoder {
    /// Decodes a fetched window.
    ///
    /// # Errors
    ///
    /// Returns [`Fault::RegisterOutOfRange`] when an assigned opcode names a
    /// register operand outside `R0..R7`. Operands of `HLT`, `RET`, reserved
    /// and unassigned opcodes are never inspected.
    pub fn decode(window: FetchedWindow) -> Result<Instruction, Fault> {
        let FetchedWindow {
            opcode,
            operand_a,
            operand_b,
        } = window;

        let Some(encoding) = classify_opcode(opcode) else {
            if is_reserved_branch_opcode(opcode) {
                return Ok(Instruction::ReservedBranch { opcode });
            }
            return Ok(Instruction::Unassigned { opcode });
        };

        let reg = |byte: u8| GeneralRegister::try_from(byte);

        let instruction = match encoding {
            OpcodeEncoding::Hlt => Instruction::Hlt,
            OpcodeEncoding::Ldi => Instruction::Ldi {
                reg: reg(operand_a)?,
                value: operand_b,
            },
            OpcodeEncoding::Prn => Instruction::Prn {
                reg: reg(operand_a)?,
            },
            OpcodeEncoding::Mul => Instruction::Mul {
                a: reg(operand_a)?,
                b: reg(operand_b)?,
            },
            OpcodeEncoding::Add => Instruction::Add {
                a: reg(operand_a)?,
                b: reg(operand_b)?,
            },
            OpcodeEncoding::Push => Instruction::Push {
                reg: reg(operand_a)?,
            },
            OpcodeEncoding::Pop => Instruction::Pop {
                reg: reg(operand_a)?,
            },
            OpcodeEncoding::Call => Instruction::Call {
                reg: reg(operand_a)?,
            },
            OpcodeEncoding::Ret => Instruction::Ret,
        };

        Ok(instruction)
    }
}

#[cfg(test)]
mod tests {
    use super::{Decoder, FetchedWindow, Instruction};
    use crate::encoding::{OP_ADD, OP_CALL, OP_HLT, OP_LDI, OP_PRN, OP_RET};
    use crate::{Fault, GeneralRegister};

    const fn window(opcode: u8, operand_a: u8, operand_b: u8) -> FetchedWindow {
        FetchedWindow {
            opcode,
            operand_a,
            operand_b,
        }
    }

    #[test]
    fn decodes_ldi_with_register_and_immediate() {
        assert_eq!(
            Decoder::decode(window(OP_LDI, 3, 0xFE)),
            Ok(Instruction::Ldi {
                reg: GeneralRegister::R3,
                value: 0xFE
            })
        );
    }

    #[test]
    fn zero_operand_opcodes_ignore_trailing_bytes() {
        assert_eq!(Decoder::decode(window(OP_HLT, 0xFF, 0xFF)), Ok(Instruction::Hlt));
        assert_eq!(Decoder::decode(window(OP_RET, 0xFF, 0xFF)), Ok(Instruction::Ret));
    }

    #[test]
    fn single_operand_opcodes_ignore_second_byte() {
        assert_eq!(
            Decoder::decode(window(OP_PRN, 1, 0xFF)),
            Ok(Instruction::Prn {
                reg: GeneralRegister::R1
            })
        );
    }

    #[test]
    fn out_of_range_register_operand_faults() {
        assert_eq!(
            Decoder::decode(window(OP_ADD, 0, 8)),
            Err(Fault::RegisterOutOfRange { index: 8 })
        );
        assert_eq!(
            Decoder::decode(window(OP_CALL, 9, 0)),
            Err(Fault::RegisterOutOfRange { index: 9 })
        );
    }

    #[test]
    fn reserved_and_unassigned_bytes_decode_without_operands() {
        assert_eq!(
            Decoder::decode(window(0b0101_0101, 0xFF, 0xFF)),
            Ok(Instruction::ReservedBranch {
                opcode: 0b0101_0101
            })
        );
        assert_eq!(
            Decoder::decode(window(0x00, 0xFF, 0xFF)),
            Ok(Instruction::Unassigned { opcode: 0x00 })
        );
    }

    #[test]
    fn display_renders_assembly_form() {
        let ldi = Decoder::decode(window(OP_LDI, 0, 8)).expect("valid LDI");
        assert_eq!(ldi.to_string(), "LDI R0, 8");
        let add = Decoder::decode(window(OP_ADD, 1, 2)).expect("valid ADD");
        assert_eq!(add.to_string(), "ADD R1, R2");
        assert_eq!(
            Instruction::Unassigned { opcode: 0 }.to_string(),
            "NOP 0b00000000"
        );
    }
}

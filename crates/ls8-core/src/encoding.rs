//! Opcode assignments and the operand-count rule.

/// `HLT`: stop the machine.
pub const OP_HLT: u8 = 0b0000_0001;
/// `LDI reg, imm`: load immediate into a register.
pub const OP_LDI: u8 = 0b1000_0010;
/// `PRN reg`: print a register in decimal.
pub const OP_PRN: u8 = 0b0100_0111;
/// `MUL regA, regB`.
pub const OP_MUL: u8 = 0b1010_0010;
/// `ADD regA, regB`.
pub const OP_ADD: u8 = 0b1010_0000;
/// `PUSH reg`.
pub const OP_PUSH: u8 = 0b0100_0101;
/// `POP reg`.
pub const OP_POP: u8 = 0b0100_0110;
/// `CALL reg`.
pub const OP_CALL: u8 = 0b0101_0000;
/// `RET`.
pub const OP_RET: u8 = 0b0001_0001;

/// Branch opcodes that own the program counter but have no handler.
///
/// Fetching one leaves `PC` unchanged, so the engine refetches it forever.
pub const RESERVED_BRANCH_OPCODES: [u8; 3] = [0b0101_0100, 0b0101_0101, 0b0101_0110];

/// Assigned instruction encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum OpcodeEncoding {
    Hlt,
    Ldi,
    Prn,
    Mul,
    Add,
    Push,
    Pop,
    Call,
    Ret,
}

/// Single source-of-truth opcode table.
///
/// Any byte not present here (and not reserved) executes as a no-op.
pub const OPCODE_ENCODING_TABLE: &[(u8, OpcodeEncoding)] = &[
    (OP_HLT, OpcodeEncoding::Hlt),
    (OP_LDI, OpcodeEncoding::Ldi),
    (OP_PRN, OpcodeEncoding::Prn),
    (OP_MUL, OpcodeEncoding::Mul),
    (OP_ADD, OpcodeEncoding::Add),
    (OP_PUSH, OpcodeEncoding::Push),
    (OP_POP, OpcodeEncoding::Pop),
    (OP_CALL, OpcodeEncoding::Call),
    (OP_RET, OpcodeEncoding::Ret),
];

impl OpcodeEncoding {
    /// Assembly mnemonic.
    #[must_use]
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Hlt => "HLT",
            Self::Ldi => "LDI",
            Self::Prn => "PRN",
            Self::Mul => "MUL",
            Self::Add => "ADD",
            Self::Push => "PUSH",
            Self::Pop => "POP",
            Self::Call => "CALL",
            Self::Ret => "RET",
        }
    }

    /// Opcode byte for this encoding.
    #[must_use]
    pub const fn opcode(self) -> u8 {
        match self {
            Self::Hlt => OP_HLT,
            Self::Ldi => OP_LDI,
            Self::Prn => OP_PRN,
            Self::Mul => OP_MUL,
            Self::Add => OP_ADD,
            Self::Push => OP_PUSH,
            Self::Pop => OP_POP,
            Self::Call => OP_CALL,
            Self::Ret => OP_RET,
        }
    }
}

/// Classifies an opcode byte against the assigned table.
#[must_use]
pub fn classify_opcode(opcode: u8) -> Option<OpcodeEncoding> {
    OPCODE_ENCODING_TABLE
        .iter()
        .find(|(byte, _)| *byte == opcode)
        .map(|(_, encoding)| *encoding)
}

/// Returns `true` for the reserved branch opcodes with no handler.
#[must_use]
pub fn is_reserved_branch_opcode(opcode: u8) -> bool {
    RESERVED_BRANCH_OPCODES.contains(&opcode)
}

/// Operand count encoded in the top two bits of the opcode.
#[must_use]
pub const fn operand_count(opcode: u8) -> usize {
    (opcode >> 6) as usize
}

/// Instruction width in bytes: the opcode plus its operands.
#[must_use]
pub const fn instruction_len(opcode: u8) -> usize {
    operand_count(opcode) + 1
}

/// Returns `true` when the generic `PC` advance must not apply.
#[must_use]
pub fn sets_pc_directly(opcode: u8) -> bool {
    opcode == OP_CALL || is_reserved_branch_opcode(opcode)
}

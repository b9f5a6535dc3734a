use crate::Fault;

/// Number of architecturally visible general-purpose registers (`R0..R7`).
pub const GENERAL_REGISTER_COUNT: usize = 8;
/// Stack pointer value loaded into `R7` at construction.
pub const STACK_POINTER_INITIAL: u8 = 0xF4;
/// `FL` bit for equal.
pub const FLAG_EQUAL: u8 = 1 << 0;
/// `FL` bit for greater-than.
pub const FLAG_GREATER: u8 = 1 << 1;
/// `FL` bit for less-than.
pub const FLAG_LESS: u8 = 1 << 2;

/// Architecturally visible general-purpose register identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum GeneralRegister {
    R0 = 0,
    R1 = 1,
    R2 = 2,
    R3 = 3,
    R4 = 4,
    R5 = 5,
    R6 = 6,
    R7 = 7,
}

impl GeneralRegister {
    /// Register reserved for the stack pointer.
    pub const STACK_POINTER: Self = Self::R7;

    /// Ordered list of all general-purpose registers.
    pub const ALL: [Self; GENERAL_REGISTER_COUNT] = [
        Self::R0,
        Self::R1,
        Self::R2,
        Self::R3,
        Self::R4,
        Self::R5,
        Self::R6,
        Self::R7,
    ];

    /// Returns the array index for this register (`0..=7`).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Resolves a raw operand byte into a register.
    #[must_use]
    pub const fn from_u8(index: u8) -> Option<Self> {
        match index {
            0 => Some(Self::R0),
            1 => Some(Self::R1),
            2 => Some(Self::R2),
            3 => Some(Self::R3),
            4 => Some(Self::R4),
            5 => Some(Self::R5),
            6 => Some(Self::R6),
            7 => Some(Self::R7),
            _ => None,
        }
    }
}

impl TryFrom<u8> for GeneralRegister {
    type Error = Fault;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Self::from_u8(index).ok_or(Fault::RegisterOutOfRange { index })
    }
}

/// The eight-slot register file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterFile {
    gpr: [u8; GENERAL_REGISTER_COUNT],
}

impl Default for RegisterFile {
    fn default() -> Self {
        let mut gpr = [0; GENERAL_REGISTER_COUNT];
        gpr[GeneralRegister::STACK_POINTER.index()] = STACK_POINTER_INITIAL;
        Self { gpr }
    }
}

impl RegisterFile {
    /// Reads a register.
    #[must_use]
    pub const fn get(&self, reg: GeneralRegister) -> u8 {
        self.gpr[reg.index()]
    }

    /// Writes a register.
    pub const fn set(&mut self, reg: GeneralRegister, value: u8) {
        self.gpr[reg.index()] = value;
    }

    /// Snapshot of all eight registers in index order.
    #[must_use]
    pub const fn values(&self) -> [u8; GENERAL_REGISTER_COUNT] {
        self.gpr
    }
}

#[cfg(test)]
mod tests {
    use super::{GeneralRegister, RegisterFile, GENERAL_REGISTER_COUNT, STACK_POINTER_INITIAL};
    use crate::Fault;

    #[test]
    fn register_count_and_decode_match_architecture() {
        assert_eq!(GENERAL_REGISTER_COUNT, 8);

        for bits in 0_u8..=7 {
            let reg = GeneralRegister::from_u8(bits).expect("valid register index");
            assert_eq!(reg.index(), usize::from(bits));
        }

        assert!(GeneralRegister::from_u8(8).is_none());
        assert_eq!(
            GeneralRegister::try_from(0xFF),
            Err(Fault::RegisterOutOfRange { index: 0xFF })
        );
    }

    #[test]
    fn reset_register_file_reserves_stack_headroom() {
        let regs = RegisterFile::default();
        assert_eq!(regs.get(GeneralRegister::R7), STACK_POINTER_INITIAL);
        assert_eq!(regs.values(), [0, 0, 0, 0, 0, 0, 0, 0xF4]);
    }

    #[test]
    fn register_file_tracks_each_register_independently() {
        let mut regs = RegisterFile::default();

        for (offset, reg) in (0_u8..).zip(GeneralRegister::ALL.iter().copied()) {
            regs.set(reg, 0x10 + offset);
        }

        for (offset, reg) in (0_u8..).zip(GeneralRegister::ALL.iter().copied()) {
            assert_eq!(regs.get(reg), 0x10 + offset);
        }
    }
}

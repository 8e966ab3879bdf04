use std::fmt;

/// The five operations of the paper computer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, enum_utils::FromStr)]
#[enumeration(case_insensitive)]
pub enum Opcode {
    Inc,
    Dec,
    Jmp,
    Isz,
    Stp,
}

impl Opcode {
    pub const fn mnemonic(&self) -> &'static str {
        match self {
            Opcode::Inc => "inc",
            Opcode::Dec => "dec",
            Opcode::Jmp => "jmp",
            Opcode::Isz => "isz",
            Opcode::Stp => "stp",
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.mnemonic())
    }
}

/// One of the four storage cells. The discriminant is the position used when
/// initial values are supplied as a plain list.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    num_enum::IntoPrimitive,
    num_enum::TryFromPrimitive,
    enum_utils::FromStr,
    enum_utils::IterVariants,
)]
#[enumeration(case_insensitive)]
#[repr(u8)]
pub enum Register {
    R0 = 0,
    R1 = 1,
    R2 = 2,
    R3 = 3,
}

pub const REGISTER_COUNT: usize = 4;

impl Register {
    /// Public access to the derived (module-private) `IterVariants::iter`.
    pub fn iter_all() -> impl Iterator<Item = Register> + Clone {
        Self::iter()
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "R{}", u8::from(*self))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Register(Register),
    /// 1-based jump target.
    Integer(i64),
    None,
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Operand::Register(register) => write!(f, "{}", register),
            Operand::Integer(target) => write!(f, "{}", target),
            Operand::None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    pub opcode: Opcode,
    pub operand: Operand,
}

impl Instruction {
    pub const fn new(opcode: Opcode, operand: Operand) -> Self {
        Self { opcode, operand }
    }

    pub const fn inc(register: Register) -> Self {
        Self::new(Opcode::Inc, Operand::Register(register))
    }

    pub const fn dec(register: Register) -> Self {
        Self::new(Opcode::Dec, Operand::Register(register))
    }

    pub const fn isz(register: Register) -> Self {
        Self::new(Opcode::Isz, Operand::Register(register))
    }

    pub const fn jmp(target: i64) -> Self {
        Self::new(Opcode::Jmp, Operand::Integer(target))
    }

    pub const fn stp() -> Self {
        Self::new(Opcode::Stp, Operand::None)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.operand {
            Operand::None => write!(f, "{}", self.opcode),
            operand => write!(f, "{} {}", self.opcode, operand),
        }
    }
}

/// Dense, 0-indexed instruction list. Blank source lines never occupy a slot.
pub type Program = Vec<Instruction>;

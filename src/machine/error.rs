use super::{Opcode, Register};

/// Raised while assembling source text. `line` is the 1-based line of the input file,
/// blank lines included.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Line {line}: Invalid instruction: {text}")]
    InvalidInstruction { line: usize, text: String },
    #[error("Line {line}: Invalid opcode: {token}")]
    InvalidOpcode { line: usize, token: String },
    /// `token` is empty when the register was missing altogether.
    #[error("Line {line}: Invalid register '{token}'")]
    InvalidRegister { line: usize, token: String },
    #[error("Line {line}: Invalid operand '{token}'")]
    InvalidOperand { line: usize, token: String },
    #[error("Line {line}: stp requires no operand")]
    UnexpectedOperand { line: usize },
}

impl ParseError {
    pub fn line(&self) -> usize {
        use ParseError::*;
        match self {
            InvalidInstruction { line, .. }
            | InvalidOpcode { line, .. }
            | InvalidRegister { line, .. }
            | InvalidOperand { line, .. }
            | UnexpectedOperand { line } => *line,
        }
    }
}

/// Raised while executing a program. `line` is `pc + 1`, the 1-based position in the
/// assembled program.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuntimeError {
    #[error("Line {line}: Error: decrementing zero register")]
    DecrementZero { line: usize },
    #[error("Line {line}: Error: incrementing {register} past {max}", max = u64::MAX)]
    RegisterOverflow { line: usize, register: Register },
    #[error("Line {line}: Invalid jump to line {target}")]
    InvalidJump { line: usize, target: i64 },
    /// `isz` tried to skip past the last instruction.
    #[error("Line {line}: Invalid jump to line {target}")]
    InvalidSkip { line: usize, target: usize },
    /// Opcode paired with an operand shape the assembler never produces.
    #[error("Line {line}: Illegal opcode: {opcode}")]
    IllegalOpcode { line: usize, opcode: Opcode },
    #[error("Line {line}: Step limit of {limit} exceeded")]
    StepLimitExceeded { line: usize, limit: u64 },
}

impl RuntimeError {
    pub fn line(&self) -> usize {
        use RuntimeError::*;
        match self {
            DecrementZero { line }
            | RegisterOverflow { line, .. }
            | InvalidJump { line, .. }
            | InvalidSkip { line, .. }
            | IllegalOpcode { line, .. }
            | StepLimitExceeded { line, .. } => *line,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_messages() {
        let err = ParseError::InvalidOpcode {
            line: 3,
            token: "add".into(),
        };
        assert_eq!(err.to_string(), "Line 3: Invalid opcode: add");
        assert_eq!(err.line(), 3);

        let err = ParseError::InvalidRegister {
            line: 1,
            token: String::new(),
        };
        assert_eq!(err.to_string(), "Line 1: Invalid register ''");

        let err = ParseError::UnexpectedOperand { line: 7 };
        assert_eq!(err.to_string(), "Line 7: stp requires no operand");
    }

    #[test]
    fn runtime_error_messages() {
        let err = RuntimeError::DecrementZero { line: 1 };
        assert_eq!(err.to_string(), "Line 1: Error: decrementing zero register");

        let err = RuntimeError::InvalidJump { line: 2, target: 0 };
        assert_eq!(err.to_string(), "Line 2: Invalid jump to line 0");

        let err = RuntimeError::IllegalOpcode {
            line: 4,
            opcode: Opcode::Stp,
        };
        assert_eq!(err.to_string(), "Line 4: Illegal opcode: stp");
        assert_eq!(err.line(), 4);

        let err = RuntimeError::RegisterOverflow {
            line: 2,
            register: Register::R3,
        };
        assert_eq!(
            err.to_string(),
            "Line 2: Error: incrementing R3 past 18446744073709551615"
        );
    }
}

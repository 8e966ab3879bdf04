use super::{Opcode, Operand, Program, Register, RuntimeError};
use rustc_hash::FxHashMap;
use std::convert::TryFrom;

pub type RegisterMapType = FxHashMap<Register, u64>;

/// Builds an initial-state mapping from positional values: the first value goes to `R0`,
/// the second to `R1` and so on. Values past `R3` are ignored.
pub fn positional_state(values: &[u64]) -> RegisterMapType {
    values
        .iter()
        .enumerate()
        .filter_map(|(index, value)| {
            let register = Register::try_from(u8::try_from(index).ok()?).ok()?;
            Some((register, *value))
        })
        .collect()
}

/// How a successful run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// An `stp` instruction was executed at this 0-based index.
    Halted(usize),
    /// The program counter moved past the last instruction.
    FellThrough,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Halt,
}

pub struct Interpreter {
    registers: RegisterMapType,
    program_counter: usize,
    instructions: Program,
    steps: u64,
    step_limit: Option<u64>,
    termination: Option<Termination>,
}

impl Interpreter {
    /// Every register starts at zero; registers named in `initial_state` are overridden.
    pub fn new(initial_state: Option<RegisterMapType>, instructions: Program) -> Self {
        let mut registers: RegisterMapType = Register::iter_all().map(|reg| (reg, 0)).collect();

        if let Some(initial_state) = initial_state {
            for (reg, val) in initial_state {
                registers.insert(reg, val);
            }
        }

        Self {
            registers,
            program_counter: 0,
            instructions,
            steps: 0,
            step_limit: None,
            termination: None,
        }
    }

    /// Aborts the run once `limit` instructions have executed. `None` runs unbounded.
    pub fn with_step_limit(mut self, limit: Option<u64>) -> Self {
        self.step_limit = limit;
        self
    }

    pub fn register(&self, register: Register) -> u64 {
        self.registers.get(&register).copied().unwrap_or(0)
    }

    pub fn registers(&self) -> &RegisterMapType {
        &self.registers
    }

    pub fn program_counter(&self) -> usize {
        self.program_counter
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn termination(&self) -> Option<Termination> {
        self.termination
    }

    /// Executes until `stp` or until the program counter leaves the program, returning the
    /// final registers. On error the registers are left as of the failing instruction.
    pub fn run(&mut self) -> Result<RegisterMapType, RuntimeError> {
        while self.program_counter < self.instructions.len() {
            if let Some(limit) = self.step_limit {
                if self.steps >= limit {
                    return Err(RuntimeError::StepLimitExceeded {
                        line: self.program_counter + 1,
                        limit,
                    });
                }
            }

            let pc = self.program_counter;
            let flow = self.step()?;
            self.steps += 1;

            if flow == Flow::Halt {
                self.termination = Some(Termination::Halted(pc));
                debug!("Halted at line {} after {} steps", pc + 1, self.steps);
                return Ok(self.registers.clone());
            }
        }

        self.termination = Some(Termination::FellThrough);
        debug!("Fell through the end after {} steps", self.steps);
        Ok(self.registers.clone())
    }

    fn step(&mut self) -> Result<Flow, RuntimeError> {
        let line = self.program_counter + 1;
        let current_instruction = self.instructions[self.program_counter];
        trace!("{}: {}", line, current_instruction);

        match (current_instruction.opcode, current_instruction.operand) {
            (Opcode::Inc, Operand::Register(reg)) => {
                let value = self.registers.entry(reg).or_insert(0);
                *value = value
                    .checked_add(1)
                    .ok_or(RuntimeError::RegisterOverflow { line, register: reg })?;
                self.program_counter += 1;
            }
            (Opcode::Dec, Operand::Register(reg)) => {
                let value = self.registers.entry(reg).or_insert(0);
                if *value == 0 {
                    return Err(RuntimeError::DecrementZero { line });
                }
                *value -= 1;
                self.program_counter += 1;
            }
            (Opcode::Jmp, Operand::Integer(target)) => {
                if target < 1 || target > self.instructions.len() as i64 {
                    return Err(RuntimeError::InvalidJump { line, target });
                }
                self.program_counter = (target - 1) as usize;
            }
            (Opcode::Isz, Operand::Register(reg)) => {
                if self.register(reg) == 0 {
                    // Landing exactly on the end counts as out of bounds.
                    let target = self.program_counter + 2;
                    if target >= self.instructions.len() {
                        return Err(RuntimeError::InvalidSkip { line, target });
                    }
                    self.program_counter = target;
                } else {
                    self.program_counter += 1;
                }
            }
            (Opcode::Stp, Operand::None) => return Ok(Flow::Halt),
            (opcode, _) => return Err(RuntimeError::IllegalOpcode { line, opcode }),
        }

        Ok(Flow::Continue)
    }
}

use super::{Instruction, Opcode, Operand, ParseError, Program, Register};
use anyhow::Context;
use std::path::Path;

/// Assembles program text into a dense instruction list.
///
/// Blank and whitespace-only lines are skipped without taking a slot in the result, but
/// errors still report the line number of the original text. The first malformed line
/// aborts the whole parse.
pub fn parse(string: impl AsRef<str>) -> Result<Program, ParseError> {
    let mut instructions = vec![];

    for (index, line) in string.as_ref().lines().enumerate() {
        let line_number = index + 1;
        let words: Vec<&str> = line.split_whitespace().collect();

        if words.is_empty() {
            continue;
        }

        instructions.push(parse_instruction(line_number, line, &words)?);
    }

    debug!("Assembled {} instructions", instructions.len());

    Ok(instructions)
}

/// Reads `path` in one go and assembles it.
pub fn parse_file(path: impl AsRef<Path>) -> anyhow::Result<Program> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Couldn't read program file {}", path.display()))?;
    let program = parse(source)?;
    Ok(program)
}

fn parse_instruction(
    line_number: usize,
    line: &str,
    words: &[&str],
) -> Result<Instruction, ParseError> {
    if words.len() > 2 {
        return Err(ParseError::InvalidInstruction {
            line: line_number,
            text: line.trim().to_owned(),
        });
    }

    let opcode: Opcode = match words[0].parse() {
        Ok(opcode) => opcode,
        Err(_) => {
            return Err(ParseError::InvalidOpcode {
                line: line_number,
                token: words[0].to_owned(),
            })
        }
    };

    let argument = words.get(1).copied();

    let operand = match opcode {
        Opcode::Inc | Opcode::Dec | Opcode::Isz => {
            match argument.map(str::parse::<Register>) {
                Some(Ok(register)) => Operand::Register(register),
                _ => {
                    return Err(ParseError::InvalidRegister {
                        line: line_number,
                        token: argument.unwrap_or_default().to_owned(),
                    })
                }
            }
        }
        Opcode::Jmp => match argument.map(str::parse::<i64>) {
            Some(Ok(target)) => Operand::Integer(target),
            _ => {
                return Err(ParseError::InvalidOperand {
                    line: line_number,
                    token: argument.unwrap_or_default().to_owned(),
                })
            }
        },
        Opcode::Stp => {
            if argument.is_some() {
                return Err(ParseError::UnexpectedOperand { line: line_number });
            }
            Operand::None
        }
    };

    Ok(Instruction::new(opcode, operand))
}

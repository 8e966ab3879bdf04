use crate::{
    config::Config,
    machine::{parse_file, positional_state, Interpreter, REGISTER_COUNT},
    report::{Report, Stage},
};
use std::{io::Write, path::PathBuf};

pub const USAGE: &str = "\
WDR Paper Computer Interpreter

Usage: wdr <program-file> [R0 [R1 [R2 [R3]]]]

Arguments:
  <program-file>  Path to the program file
  R0..R3          Initial values for registers R0, R1, R2, R3

Environment:
  WDR_REPORT      Register dump format, text or json (default: text)
  WDR_MAX_STEPS   Abort after this many executed instructions
  RUST_LOG        Log filter, e.g. debug or trace

Example: wdr program.asm 1 2 3 4";

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Help,
    Run(Args),
}

#[derive(Debug, PartialEq, Eq)]
pub struct Args {
    pub filename: PathBuf,
    /// Positional initial values, `R0` first.
    pub registers: Vec<u64>,
}

impl Command {
    /// Parses the arguments after the program name.
    pub fn parse<I, S>(args: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut args = args.into_iter();

        let filename = match args.next() {
            Some(arg) => match arg.as_ref() {
                "-h" | "--help" => return Ok(Command::Help),
                filename => PathBuf::from(filename),
            },
            None => anyhow::bail!("You haven't provided a program file.\n\n{}", USAGE),
        };

        let mut registers = vec![];
        for arg in args {
            let arg = arg.as_ref();
            let value: u64 = match arg.parse() {
                Ok(value) => value,
                Err(_) => anyhow::bail!(
                    "Invalid initial register value {}: expected a non-negative integer",
                    arg
                ),
            };
            registers.push(value);
        }

        if registers.len() > REGISTER_COUNT {
            anyhow::bail!(
                "Got {} initial register values but there are only {} registers",
                registers.len(),
                REGISTER_COUNT
            );
        }

        Ok(Command::Run(Args {
            filename,
            registers,
        }))
    }
}

/// Assembles the file, dumps the initial registers, runs the program and dumps the final
/// registers. Nothing is printed after a failure apart from what the caller does with the error.
pub fn run(args: &Args, config: &Config, out: impl Write) -> anyhow::Result<()> {
    let instructions = parse_file(&args.filename)?;

    let initial_state = if args.registers.is_empty() {
        None
    } else {
        Some(positional_state(&args.registers))
    };

    let mut interpreter =
        Interpreter::new(initial_state, instructions).with_step_limit(config.max_steps);
    let mut report = Report::new(config.report_format, out);

    report.write(Stage::Initial, interpreter.registers())?;
    let registers = interpreter.run()?;
    debug!(
        "{:?} after {} steps",
        interpreter.termination(),
        interpreter.steps()
    );
    report.write(Stage::Final, &registers)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::{Register, RuntimeError};
    use crate::report::ReportFormat;

    fn write_program(name: &str, source: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("wdr-{}-{}.wdr", name, std::process::id()));
        std::fs::write(&path, source).unwrap();
        path
    }

    #[test]
    fn parses_filename_and_registers() {
        let command = Command::parse(vec!["prog.wdr", "1", "0", "7"]).unwrap();
        assert_eq!(
            command,
            Command::Run(Args {
                filename: "prog.wdr".into(),
                registers: vec![1, 0, 7],
            })
        );
    }

    #[test]
    fn help_flag() {
        assert_eq!(Command::parse(vec!["--help"]).unwrap(), Command::Help);
        assert_eq!(Command::parse(vec!["-h", "3"]).unwrap(), Command::Help);
    }

    #[test]
    fn rejects_missing_filename() {
        assert!(Command::parse(Vec::<String>::new()).is_err());
    }

    #[test]
    fn rejects_bad_register_values() {
        assert!(Command::parse(vec!["prog.wdr", "-1"]).is_err());
        assert!(Command::parse(vec!["prog.wdr", "two"]).is_err());
        assert!(Command::parse(vec!["prog.wdr", "1", "2", "3", "4", "5"]).is_err());
    }

    #[test]
    fn largest_register_value_overflows_at_runtime() {
        let command = Command::parse(vec!["prog.wdr", "18446744073709551615"]).unwrap();
        assert_eq!(
            command,
            Command::Run(Args {
                filename: "prog.wdr".into(),
                registers: vec![u64::MAX],
            })
        );
        assert!(Command::parse(vec!["prog.wdr", "18446744073709551616"]).is_err());

        let path = write_program("overflow", "inc R0\nstp\n");
        let args = Args {
            filename: path.clone(),
            registers: vec![u64::MAX],
        };
        let mut out = vec![];
        let err = run(&args, &Config::default(), &mut out).unwrap_err();
        std::fs::remove_file(path).unwrap();

        assert_eq!(
            err.downcast_ref::<RuntimeError>(),
            Some(&RuntimeError::RegisterOverflow {
                line: 1,
                register: Register::R0
            })
        );
    }

    #[test]
    fn runs_and_reports_both_states() {
        let path = write_program("report", "inc R0\ninc R0\ndec R0\nstp\n");
        let args = Args {
            filename: path.clone(),
            registers: vec![0, 4],
        };
        let mut out = vec![];
        run(&args, &Config::default(), &mut out).unwrap();
        std::fs::remove_file(path).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "=== Initial state ===\nR0: 0\nR1: 4\nR2: 0\nR3: 0\n\
             === Final state ===\nR0: 1\nR1: 4\nR2: 0\nR3: 0\n"
        );
    }

    #[test]
    fn runtime_errors_surface_with_line() {
        let path = write_program("runtime-error", "dec R1\nstp\n");
        let args = Args {
            filename: path.clone(),
            registers: vec![],
        };
        let mut out = vec![];
        let err = run(&args, &Config::default(), &mut out).unwrap_err();
        std::fs::remove_file(path).unwrap();

        assert_eq!(
            err.downcast_ref::<RuntimeError>(),
            Some(&RuntimeError::DecrementZero { line: 1 })
        );
        let output = String::from_utf8(out).unwrap();
        assert!(output.starts_with("=== Initial state ==="));
        assert!(!output.contains("Final"));
    }

    #[test]
    fn parse_errors_surface_before_any_output() {
        let path = write_program("parse-error", "inc R0\n\nstp now\n");
        let args = Args {
            filename: path.clone(),
            registers: vec![],
        };
        let mut out = vec![];
        let err = run(&args, &Config::default(), &mut out).unwrap_err();
        std::fs::remove_file(path).unwrap();

        assert_eq!(err.to_string(), "Line 3: stp requires no operand");
        assert!(out.is_empty());
    }

    #[test]
    fn step_limit_from_config() {
        let path = write_program("step-limit", "jmp 1\n");
        let args = Args {
            filename: path.clone(),
            registers: vec![],
        };
        let config = Config {
            report_format: ReportFormat::Json,
            max_steps: Some(3),
        };
        let mut out = vec![];
        let err = run(&args, &config, &mut out).unwrap_err();
        std::fs::remove_file(path).unwrap();

        assert!(matches!(
            err.downcast_ref::<RuntimeError>(),
            Some(RuntimeError::StepLimitExceeded { limit: 3, .. })
        ));
    }
}

mod error;
mod interpreter;
mod isa;
/// Parse -> hand the instructions to an Interpreter -> run to `stp` or the end of the program
mod parser;

pub use error::*;
pub use interpreter::*;
pub use isa::*;
pub use parser::*;

#[cfg(test)]
mod tests {
    use super::*;

    const ADD: &str = include_str!("../../programs/add.wdr");
    const COPY: &str = include_str!("../../programs/copy.wdr");

    fn run_with(source: &str, initial: &[u64]) -> RegisterMapType {
        let program = parse(source).unwrap();
        Interpreter::new(Some(positional_state(initial)), program)
            .run()
            .unwrap()
    }

    #[test]
    fn add_program_sums_r0_and_r1() {
        let registers = run_with(ADD, &[4, 9]);
        assert_eq!(registers[&Register::R0], 13);
        assert_eq!(registers[&Register::R1], 0);
    }

    #[test]
    fn add_program_with_zero_operand() {
        let registers = run_with(ADD, &[6]);
        assert_eq!(registers[&Register::R0], 6);
        assert_eq!(registers[&Register::R1], 0);
    }

    #[test]
    fn copy_program_keeps_source_intact() {
        let registers = run_with(COPY, &[3]);
        assert_eq!(registers[&Register::R0], 3);
        assert_eq!(registers[&Register::R1], 3);
        assert_eq!(registers[&Register::R2], 0);
    }
}

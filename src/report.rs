use crate::machine::{Register, RegisterMapType};
use serde_json::{json, Map, Value};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, enum_utils::FromStr)]
#[enumeration(case_insensitive)]
pub enum ReportFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Initial,
    Final,
}

impl Stage {
    fn title(&self) -> &'static str {
        match self {
            Stage::Initial => "Initial",
            Stage::Final => "Final",
        }
    }
}

/// Dumps register snapshots, always in `R0`..`R3` order.
pub struct Report<W: Write> {
    format: ReportFormat,
    out: W,
}

impl<W: Write> Report<W> {
    pub fn new(format: ReportFormat, out: W) -> Self {
        Self { format, out }
    }

    pub fn write(&mut self, stage: Stage, registers: &RegisterMapType) -> anyhow::Result<()> {
        match self.format {
            ReportFormat::Text => {
                writeln!(self.out, "=== {} state ===", stage.title())?;
                for reg in Register::iter_all() {
                    writeln!(self.out, "{}: {}", reg, value_of(registers, reg))?;
                }
            }
            ReportFormat::Json => {
                let mut map = Map::new();
                for reg in Register::iter_all() {
                    map.insert(reg.to_string(), value_of(registers, reg).into());
                }
                let snapshot = json!({ "stage": stage, "registers": Value::Object(map) });
                writeln!(self.out, "{}", serde_json::to_string(&snapshot)?)?;
            }
        }
        self.out.flush()?;
        Ok(())
    }
}

fn value_of(registers: &RegisterMapType, reg: Register) -> u64 {
    registers.get(&reg).copied().unwrap_or(0)
}

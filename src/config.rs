use crate::report::ReportFormat;

lazy_static! {
    // read on first use, so `dotenv()` has to run before anything touches these
    static ref WDR_REPORT: Option<String> = std::env::var("WDR_REPORT").ok();
    static ref WDR_MAX_STEPS: Option<String> = std::env::var("WDR_MAX_STEPS").ok();
}

/// Loads `.env` from the working directory into the process environment, if there is one.
/// Variables that are already set win.
pub fn load_dotenv() {
    if let Err(err) = dotenv::dotenv() {
        debug!("No .env loaded: {}", err);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub report_format: ReportFormat,
    /// `None` lets a program loop forever.
    pub max_steps: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            report_format: ReportFormat::Text,
            max_steps: None,
        }
    }
}

impl Config {
    /// Reads `WDR_REPORT` and `WDR_MAX_STEPS`. Call [`load_dotenv`] first for `.env` values
    /// to be seen.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_vars(WDR_REPORT.as_deref(), WDR_MAX_STEPS.as_deref())
    }

    pub fn from_vars(report: Option<&str>, max_steps: Option<&str>) -> anyhow::Result<Self> {
        let mut config = Self::default();

        if let Some(report) = report {
            config.report_format = match report.parse() {
                Ok(format) => format,
                Err(_) => anyhow::bail!(
                    "WDR_REPORT must be either text or json, got {}",
                    report
                ),
            };
        }

        if let Some(max_steps) = max_steps {
            let limit: u64 = match max_steps.trim().parse() {
                Ok(limit) if limit > 0 => limit,
                _ => anyhow::bail!(
                    "WDR_MAX_STEPS must be a positive integer, got {}",
                    max_steps
                ),
            };
            config.max_steps = Some(limit);
        }

        Ok(config)
    }
}

//! Command-line configuration with environment fallbacks.

use std::path::PathBuf;

use clap::Args;
use planner_timer::SessionDurations;
use tracing_subscriber::EnvFilter;

/// Settings shared by every subcommand.
#[derive(Debug, Clone, Args)]
pub struct Config {
    /// Directory holding the tasks and goals records
    #[arg(long, env = "PLANNER_DATA_DIR", default_value = ".planner", global = true)]
    pub data_dir: PathBuf,

    /// Work session length in seconds
    #[arg(long, env = "PLANNER_WORK_SECS", default_value_t = 1500, global = true)]
    pub work_secs: u64,

    /// Short break length in seconds
    #[arg(long, env = "PLANNER_SHORT_BREAK_SECS", default_value_t = 300, global = true)]
    pub short_break_secs: u64,

    /// Long break length in seconds
    #[arg(long, env = "PLANNER_LONG_BREAK_SECS", default_value_t = 900, global = true)]
    pub long_break_secs: u64,

    /// Log filter (overrides RUST_LOG), e.g. "debug" or "planner_work=trace"
    #[arg(long, env = "PLANNER_LOG", global = true)]
    pub log_level: Option<String>,
}

impl Config {
    /// Pomodoro session lengths.
    pub fn durations(&self) -> SessionDurations {
        SessionDurations {
            work: self.work_secs,
            short_break: self.short_break_secs,
            long_break: self.long_break_secs,
        }
    }

    /// Log filter: explicit level, then RUST_LOG, then warnings only.
    pub fn env_filter(&self) -> EnvFilter {
        match &self.log_level {
            Some(level) => EnvFilter::new(level),
            None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        config: Config,
    }

    #[test]
    fn test_defaults() {
        let cli = TestCli::parse_from(["planner"]);
        assert_eq!(cli.config.durations(), SessionDurations::default());
    }

    #[test]
    fn test_overrides() {
        let cli = TestCli::parse_from(["planner", "--data-dir", "/tmp/p", "--work-secs", "60"]);
        assert_eq!(cli.config.data_dir, PathBuf::from("/tmp/p"));
        assert_eq!(cli.config.durations().work, 60);
        assert_eq!(cli.config.durations().short_break, 300);
    }
}

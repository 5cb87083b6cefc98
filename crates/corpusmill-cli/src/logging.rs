use stderrlog::{LogLevelNum, Timestamp};

/// Default verbosity of commands which report progress (info).
pub const PROGRESS_VERBOSITY: u8 = 3;

/// Default verbosity of commands whose stdout is data (warn).
pub const DATA_VERBOSITY: u8 = 2;

/// Logging setup arg group.
#[derive(clap::Args, Debug, Default)]
pub struct LogArgs {
    /// Silence log messages.
    #[clap(short, long)]
    pub quiet: bool,

    /// Raise verbosity one step above the command default (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Enable timestamped logging.
    #[clap(short, long)]
    pub ts: bool,
}

impl LogArgs {
    /// The effective verbosity; 0=off, 1=error, 2=warn, 3=info, 4=debug, 5+=trace.
    ///
    /// `-v` steps up from the command's `default`; `-q` wins over both.
    pub fn verbosity(
        &self,
        default: u8,
    ) -> u8 {
        if self.quiet {
            0
        } else {
            default.saturating_add(self.verbose)
        }
    }

    /// Initialize `stderrlog` for a command with the given default verbosity.
    pub fn setup_logging(
        &self,
        default: u8,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let log_level = match self.verbosity(default) {
            0 => LogLevelNum::Off,
            1 => LogLevelNum::Error,
            2 => LogLevelNum::Warn,
            3 => LogLevelNum::Info,
            4 => LogLevelNum::Debug,
            _ => LogLevelNum::Trace,
        };

        stderrlog::new()
            .quiet(self.quiet)
            .verbosity(log_level)
            .timestamp(if self.ts {
                Timestamp::Second
            } else {
                Timestamp::Off
            })
            .init()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_steps_from_command_default() {
        let args = LogArgs::default();
        assert_eq!(args.verbosity(PROGRESS_VERBOSITY), 3);
        assert_eq!(args.verbosity(DATA_VERBOSITY), 2);

        let args = LogArgs {
            verbose: 2,
            ..Default::default()
        };
        assert_eq!(args.verbosity(PROGRESS_VERBOSITY), 5);
        assert_eq!(args.verbosity(DATA_VERBOSITY), 4);

        let args = LogArgs {
            verbose: u8::MAX,
            ..Default::default()
        };
        assert_eq!(args.verbosity(DATA_VERBOSITY), u8::MAX);
    }

    #[test]
    fn test_quiet_overrides_verbose() {
        let args = LogArgs {
            quiet: true,
            verbose: 3,
            ts: false,
        };
        assert_eq!(args.verbosity(PROGRESS_VERBOSITY), 0);
    }
}

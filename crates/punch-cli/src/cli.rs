//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Employee attendance console.
///
/// Registers employees, records clock-ins and clock-outs, and prints attendance
/// reports. Commands are read one per line from standard input or a script file;
/// all data lives in memory for the duration of the session.
#[derive(Debug, Parser)]
#[command(name = "punch", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Read commands from a file instead of standard input.
    #[arg(short, long)]
    pub script: Option<PathBuf>,
}

/// One line typed at the console.
#[derive(Debug, Parser)]
#[command(
    name = "punch",
    no_binary_name = true,
    disable_version_flag = true,
    override_usage = "<COMMAND> [ARGS]"
)]
pub struct ConsoleLine {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available console commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Register a new employee.
    Register(RegisterArgs),

    /// List registered employees.
    Employees {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Record an entrance (clock-in).
    In(ClockArgs),

    /// Record an exit (clock-out).
    Out(ClockArgs),

    /// Show the attendance records of one employee.
    History {
        /// Employee ID.
        id: String,

        /// Only records still waiting for an exit.
        #[arg(long)]
        open: bool,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List every attendance record.
    Records {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Summary of employees and attendance.
    Report {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Employees by age.
    Ages {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Distribution of employees across shifts.
    Shifts {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Load demonstration employees and attendance.
    Sample,

    /// End the session.
    #[command(alias = "exit")]
    Quit,
}

#[derive(Debug, Args)]
pub struct RegisterArgs {
    /// Employee ID (registration number).
    pub id: String,

    /// Full name. Quote names containing spaces.
    pub name: String,

    /// Age in years.
    #[arg(allow_negative_numbers = true)]
    pub age: i64,

    /// Shift: morning, afternoon or night.
    pub shift: String,
}

#[derive(Debug, Args)]
pub struct ClockArgs {
    /// Employee ID.
    pub id: String,

    /// Date of the event (default: today).
    #[arg(long)]
    pub date: Option<String>,

    /// Time of the event (default: now).
    #[arg(long)]
    pub time: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    use clap::CommandFactory;

    #[test]
    fn cli_definitions_are_valid() {
        Cli::command().debug_assert();
        ConsoleLine::command().debug_assert();
    }

    #[test]
    fn parses_clock_args() {
        let line = ConsoleLine::try_parse_from(["in", "001", "--date", "28/11/2025"]).unwrap();
        let Commands::In(args) = line.command else {
            panic!("expected in command");
        };
        assert_eq!(args.id, "001");
        assert_eq!(args.date.as_deref(), Some("28/11/2025"));
        assert!(args.time.is_none());
    }

    #[test]
    fn exit_is_an_alias_for_quit() {
        let line = ConsoleLine::try_parse_from(["exit"]).unwrap();
        assert!(matches!(line.command, Commands::Quit));
    }

    #[test]
    fn register_accepts_negative_age_for_validation() {
        let line = ConsoleLine::try_parse_from(["register", "001", "Ana", "-3", "night"]).unwrap();
        let Commands::Register(args) = line.command else {
            panic!("expected register command");
        };
        assert_eq!(args.age, -3);
    }

    #[test]
    fn parses_history_flags() {
        let line = ConsoleLine::try_parse_from(["history", "001", "--open"]).unwrap();
        let Commands::History { id, open, json } = line.command else {
            panic!("expected history command");
        };
        assert_eq!(id, "001");
        assert!(open);
        assert!(!json);
    }
}

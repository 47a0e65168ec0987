//! Interactive console session.
//!
//! A session owns the registry and ledger for the lifetime of the process. Each
//! input line is tokenized, parsed with clap and dispatched to a command. Command
//! failures are written to the output as `error: ...` and the session carries on;
//! only I/O errors on the reader or writer end it.

use std::io::{BufRead, Write};

use anyhow::Result;
use clap::Parser;
use punch_core::{ClockStamp, Ledger, Registry};

use crate::Config;
use crate::cli::{Commands, ConsoleLine};
use crate::commands::{clock, employees, records, report, sample, util};

/// Whether the session should keep reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// In-memory attendance state plus the settings used to present it.
#[derive(Debug)]
pub struct Session {
    registry: Registry,
    ledger: Ledger,
    config: Config,
}

impl Session {
    pub fn new(config: Config) -> Self {
        Self {
            registry: Registry::new(),
            ledger: Ledger::with_policy(config.entrance_policy),
            config,
        }
    }

    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    pub const fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Reads and executes commands until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        mut reader: R,
        writer: &mut W,
        prompt: bool,
    ) -> Result<()> {
        loop {
            if prompt {
                write!(writer, "punch> ")?;
                writer.flush()?;
            }

            let mut line = String::new();
            if reader.read_line(&mut line)? == 0 {
                break;
            }
            if self.execute(writer, &line)? == Flow::Quit {
                break;
            }
        }
        writer.flush()?;
        Ok(())
    }

    /// Executes a single console line.
    pub fn execute<W: Write>(&mut self, writer: &mut W, line: &str) -> Result<Flow> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(Flow::Continue);
        }

        let args = match util::split_line(line) {
            Ok(args) => args,
            Err(err) => {
                writeln!(writer, "error: {err}")?;
                return Ok(Flow::Continue);
            }
        };

        let parsed = match ConsoleLine::try_parse_from(args) {
            Ok(parsed) => parsed,
            Err(err) => {
                // Covers `help` and `--help` as well as usage errors.
                write!(writer, "{}", err.render())?;
                return Ok(Flow::Continue);
            }
        };

        tracing::debug!(command = ?parsed.command, "dispatching");
        if matches!(parsed.command, Commands::Quit) {
            return Ok(Flow::Quit);
        }

        if let Err(err) = self.dispatch(writer, &parsed.command) {
            if err.is::<std::io::Error>() {
                return Err(err);
            }
            tracing::debug!(error = %err, "command rejected");
            writeln!(writer, "error: {err}")?;
        }
        Ok(Flow::Continue)
    }

    fn dispatch<W: Write>(&mut self, writer: &mut W, command: &Commands) -> Result<()> {
        let now = ClockStamp::now();
        match command {
            Commands::Register(args) => employees::register(writer, &mut self.registry, args),
            Commands::Employees { json } => employees::list(writer, &self.registry, *json),
            Commands::In(args) => clock::clock_in(
                writer,
                &self.registry,
                &mut self.ledger,
                &self.config,
                args,
                now,
            ),
            Commands::Out(args) => clock::clock_out(
                writer,
                &self.registry,
                &mut self.ledger,
                &self.config,
                args,
                now,
            ),
            Commands::History { id, open, json } => clock::history(
                writer,
                &self.registry,
                &self.ledger,
                &self.config,
                id,
                *open,
                *json,
            ),
            Commands::Records { json } => {
                records::list(writer, &self.registry, &self.ledger, &self.config, *json)
            }
            Commands::Report { json } => report::run(writer, &self.registry, &self.ledger, *json),
            Commands::Ages { json } => report::ages(writer, &self.registry, *json),
            Commands::Shifts { json } => report::shifts(writer, &self.registry, *json),
            Commands::Sample => sample::load(writer, &mut self.registry, &mut self.ledger),
            Commands::Quit => Ok(()),
        }
    }
}

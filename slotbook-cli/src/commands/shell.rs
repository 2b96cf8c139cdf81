//! Interactive shell.
//!
//! Reads one request per line from stdin and answers in short messages.
//! Recoverable errors are reported and the session continues; a
//! persistence failure ends it.

use crate::error::CliError;
use crate::output::write_outcome;
use crate::utils::{
    load_configuration, open_database, output_format, resolve_caller, GlobalOptions,
};
use clap::Args;
use slotbook::config::OutputFormat;
use slotbook::{Caller, Command, Error, ErrorKind, Role, Scheduler};
use std::io::{self, BufRead, Write};

const BANNER: &str = "Welcome to the COVID-19 Vaccine Reservation Scheduling Application!";

const COMMAND_LIST: &[&str] = &[
    "> search_caregiver_schedule <date>",
    "> reserve <date> <vaccine>",
    "> upload_availability <date>",
    "> cancel <appointment_id>",
    "> add_doses <vaccine> <number>",
    "> show_appointments",
    "> quit",
];

/// Account commands answered with a pointer to the identity flags.
const ACCOUNT_COMMANDS: &[&str] = &[
    "create_patient",
    "create_caregiver",
    "login_patient",
    "login_caregiver",
    "logout",
];

/// Start an interactive session for the configured caller.
#[derive(Args)]
pub struct ShellCommand {
    /// Do not print the welcome banner or prompt
    #[arg(long)]
    pub no_banner: bool,
}

impl ShellCommand {
    /// Execute the shell command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let caller = resolve_caller(global)?;
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;
        let mut scheduler = Scheduler::new(db, &config);

        let mut session = Session {
            scheduler: &mut scheduler,
            caller: &caller,
            format: output_format(global, &config),
            interactive: !self.no_banner && !global.quiet,
        };

        let stdin = io::stdin();
        let stdout = io::stdout();
        session.run(stdin.lock(), &mut stdout.lock())
    }
}

/// One caller's session over one database connection.
pub struct Session<'a> {
    /// The scheduler requests run against.
    pub scheduler: &'a mut Scheduler,
    /// The identity every request acts for.
    pub caller: &'a Caller,
    /// How outcomes are rendered.
    pub format: OutputFormat,
    /// Print the banner and a prompt before each line.
    pub interactive: bool,
}

impl Session<'_> {
    /// Read requests from `input` until `quit`, end of input, or a fatal error.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<(), CliError> {
        if self.interactive {
            writeln!(out)?;
            writeln!(out, "{BANNER}")?;
            writeln!(out)?;
            writeln!(out, " *** Please enter one of the following commands *** ")?;
            for line in COMMAND_LIST {
                writeln!(out, "{line}")?;
            }
            writeln!(out)?;
        }

        let mut lines = input.lines();
        loop {
            if self.interactive {
                write!(out, "> ")?;
                out.flush()?;
            }

            let Some(line) = lines.next() else {
                return Ok(());
            };
            let line = line?.to_lowercase();
            let tokens: Vec<&str> = line.split_whitespace().collect();

            match tokens.first().copied() {
                None => writeln!(out, "Please try again!")?,
                Some("quit") => {
                    writeln!(out, "Bye!")?;
                    return Ok(());
                }
                Some(name) if ACCOUNT_COMMANDS.contains(&name) => writeln!(
                    out,
                    "Signed in as {}; restart with --user and --role to switch.",
                    self.caller
                )?,
                Some(_) => self.handle(&tokens, out)?,
            }
        }
    }

    /// Run one request. Only a fatal error is returned.
    fn handle<W: Write>(&mut self, tokens: &[&str], out: &mut W) -> Result<(), CliError> {
        let command = match Command::parse(tokens) {
            Ok(command) => command,
            Err(Error::UnknownOperation { .. }) => {
                writeln!(out, "Invalid operation name!")?;
                return Ok(());
            }
            Err(e) => {
                log::warn!("{e}");
                writeln!(out, "Please try again!")?;
                return Ok(());
            }
        };

        let cancel_id = match &command {
            Command::Cancel { id } => Some(*id),
            _ => None,
        };

        match self.scheduler.execute(self.caller, command) {
            Ok(outcome) => write_outcome(out, &outcome, self.format),
            Err(e) if e.is_fatal() => {
                writeln!(out, "Please try again!")?;
                Err(e.into())
            }
            Err(e) => {
                log::warn!("{e}");
                match (e.kind(), cancel_id) {
                    (ErrorKind::NotFound | ErrorKind::NotOwner, Some(id)) => {
                        writeln!(out, "Could not find appointment with id: {id}")?;
                    }
                    _ => writeln!(out, "{}", rejection_message(&e))?,
                }
                Ok(())
            }
        }
    }
}

fn rejection_message(err: &Error) -> &'static str {
    match err {
        Error::NoProviderAvailable { .. } => "No Caregiver is available!",
        Error::InsufficientStock { .. } => "Not enough available doses!",
        Error::NotPermitted {
            required: Role::Provider,
            ..
        } => "Please login as a caregiver first!",
        Error::NotPermitted {
            required: Role::Requester,
            ..
        } => "Please login as a patient!",
        _ => "Please try again!",
    }
}

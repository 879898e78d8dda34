// The interactive command menu.

use std::io::{BufRead, Write};

use log::LevelFilter;

use crate::sim::*;

pub const PROMPT: &str = "VM> ";

const HELP_ALL: &str = "Available commands:
logging [level] - Sets the logging level
help [command] - Displays help for a command
exit - Exits the program";

const HELP_EXIT: &str = "exit - Exits the program";

const HELP_LOGGING: &str = "logging [level] - Sets the logging level
    Available levels:
        critical
        error
        warning
        info
        debug
        notset";

const HELP_UNKNOWN: &str = "No help available for this command, or command is not available.";

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum Outcome {
    Continue,
    Exit,
}

pub fn help_text(command: &str) -> &'static str {
    match command {
        "help" => HELP_ALL,
        "exit" => HELP_EXIT,
        "logging" => HELP_LOGGING,
        _ => HELP_UNKNOWN,
    }
}

pub fn parse_level(level: &str) -> Option<LevelFilter> {
    match level {
        "critical" | "error" => Some(LevelFilter::Error),
        "warning" => Some(LevelFilter::Warn),
        "info" => Some(LevelFilter::Info),
        "debug" => Some(LevelFilter::Debug),
        "notset" => Some(LevelFilter::Trace),
        _ => None,
    }
}

/// Executes one line of input. The only side effect besides writing to `out`
/// is the change of the global logging level.
pub fn handle_command<W: Write>(line: &str, out: &mut W) -> std::io::Result<Outcome> {
    let words: Vec<&str> = line.split_whitespace().collect();
    match words.as_slice() {
        [] => {}
        ["help"] => writeln!(out, "{}", help_text("help"))?,
        ["help", command, ..] => writeln!(out, "{}", help_text(command))?,
        ["exit", ..] => return Ok(Outcome::Exit),
        ["logging"] => writeln!(out, "{}", help_text("logging"))?,
        ["logging", level, ..] => match parse_level(level) {
            Some(filter) => {
                log::set_max_level(filter);
                writeln!(out, "Logging level set to {}.", level.to_uppercase())?;
            }
            None => writeln!(out, "Invalid logging level.")?,
        },
        _ => writeln!(out, "Invalid command. Type 'help' for a list of commands.")?,
    }
    Ok(Outcome::Continue)
}

/// Reads commands until `exit` or the end of the input.
pub fn run_menu<R: BufRead, W: Write>(input: R, mut out: W) -> SimResult<()> {
    writeln!(out, "fptpsim {}", env!("CARGO_PKG_VERSION")).context(TerminalSnafu {})?;
    let mut lines = input.lines();
    loop {
        write!(out, "{}", PROMPT).context(TerminalSnafu {})?;
        out.flush().context(TerminalSnafu {})?;
        let line = match lines.next() {
            Some(l) => l.context(TerminalSnafu {})?,
            None => break,
        };
        debug!("run_menu: {:?}", line);
        if handle_command(&line, &mut out).context(TerminalSnafu {})? == Outcome::Exit {
            break;
        }
    }
    Ok(())
}

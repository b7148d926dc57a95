use crate::command::ParsedCommand;
use crate::commands::{self, Flow};
use crate::session::Session;
use anyhow::Context;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

pub const PROMPT: &str = "gate> ";

/// Limit on `LOAD CMD` nesting
const MAX_SCRIPT_DEPTH: usize = 16;

/// Run one line. Command failures are printed and do not end the session.
pub fn execute_line(
    session: &mut Session,
    line: &str,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> anyhow::Result<Flow> {
    let Some(command) = ParsedCommand::parse(line) else {
        return Ok(Flow::Continue);
    };

    tracing::debug!(verb = command.verb.as_str(), args = command.arguments.len(), "Executing command");
    match commands::dispatch(session, &command, input, out) {
        Ok(flow) => Ok(flow),
        Err(e) => {
            tracing::debug!("Command failed: {:#}", e);
            writeln!(out, "{:#}", e)?;
            Ok(Flow::Continue)
        }
    }
}

/// Execute lines from `reader` until it ends or a command exits
pub fn run_reader(
    session: &mut Session,
    reader: &mut dyn BufRead,
    out: &mut dyn Write,
    prompt: bool,
) -> anyhow::Result<Flow> {
    let mut line = String::new();
    loop {
        if prompt {
            write!(out, "{}", PROMPT)?;
            out.flush()?;
        }

        line.clear();
        if reader.read_line(&mut line)? == 0 {
            if prompt {
                writeln!(out)?;
            }
            return Ok(Flow::Continue);
        }

        if execute_line(session, &line, reader, out)? == Flow::Exit {
            return Ok(Flow::Exit);
        }
    }
}

/// Execute a command file. Element lines for `SAT ADD` come from the file.
pub fn run_script(session: &mut Session, path: &Path, out: &mut dyn Write) -> anyhow::Result<Flow> {
    if session.script_depth >= MAX_SCRIPT_DEPTH {
        anyhow::bail!("Command files nested deeper than {} levels", MAX_SCRIPT_DEPTH);
    }

    let file = File::open(path).with_context(|| format!("Failed to open command file {}", path.display()))?;
    let mut reader = BufReader::new(file);

    tracing::info!(path = %path.display(), "Running command file");
    session.script_depth += 1;
    let flow = run_reader(session, &mut reader, out, false);
    session.script_depth -= 1;
    flow
}

/// Run the command files in order, then the prompt
pub fn run(
    session: &mut Session,
    scripts: &[PathBuf],
    stdin: &mut dyn BufRead,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    for script in scripts {
        match run_script(session, script, out) {
            Ok(Flow::Exit) => return Ok(()),
            Ok(Flow::Continue) => {}
            Err(e) => writeln!(out, "{:#}", e)?,
        }
    }

    run_reader(session, stdin, out, true)?;
    Ok(())
}

///! Command dispatch
///!
///! Every handler writes its output to `out`. Handlers that need more input
///! than their own line (`SAT ADD`) read it from `input`, which is stdin at
///! the prompt and the command file while a file runs.

mod observe;
mod registry;
mod system;

use crate::command::{ParsedCommand, Verb};
use crate::session::Session;
use std::io::{BufRead, Write};

pub use observe::{BODY_FRAME, CALC_FRAME, SAT_FRAME, STAR_FRAME};
pub use system::HELP_TEXT;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub fn dispatch(
    session: &mut Session,
    command: &ParsedCommand,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> anyhow::Result<Flow> {
    match command.verb {
        Verb::Help => system::help(out)?,
        Verb::Exit => return Ok(Flow::Exit),
        Verb::Set => system::set(session, command, out)?,
        Verb::Get => system::get(session, command, out)?,
        Verb::Load => return system::load(session, command, out),
        Verb::Show => system::show(session, command, out)?,
        Verb::Star | Verb::Body | Verb::Sat | Verb::Calc => compound(session, command, input, out)?,
        Verb::Unknown => anyhow::bail!("Unrecognized command: '{}'. Try HELP?", command.word),
    }
    Ok(Flow::Continue)
}

/// Verbs whose first argument selects the action
fn compound(
    session: &mut Session,
    command: &ParsedCommand,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let Some(action) = command.action() else {
        anyhow::bail!("{} requires an action. Try HELP?", command.verb.as_str());
    };

    match (command.verb, action.as_str()) {
        (Verb::Star, "INFO") => registry::star_info(session, command, out),
        (Verb::Star, "AZEL") => observe::star_azel(session, command, out),
        (Verb::Body, "INFO") => registry::body_info(session, command, out),
        (Verb::Body, "AZEL") => observe::body_azel(session, command, out),
        (Verb::Sat, "ADD") => registry::sat_add(session, command, input, out),
        (Verb::Sat, "REM") => registry::sat_rem(session, command, out),
        (Verb::Sat, "INFO") => registry::sat_info(session, command, out),
        (Verb::Sat, "AZEL") => observe::sat_azel(session, command, out),
        (Verb::Calc, "ADD") => registry::calc_add(session, command, out),
        (Verb::Calc, "REM") => registry::calc_rem(session, command, out),
        (Verb::Calc, "INFO") => registry::calc_info(session, command, out),
        (Verb::Calc, "AZEL") => observe::calc_azel(session, command, out),
        _ => anyhow::bail!("Unrecognized option: '{}'", command.arg(0).unwrap_or_default()),
    }
}

use super::Flow;
use crate::command::ParsedCommand;
use crate::options::OptionKey;
use crate::repl;
use crate::session::Session;
use gate_core::toolkit::Toolkit;
use std::io::Write;
use std::path::Path;

pub const HELP_TEXT: &str = "\
You can Ctrl+C any time to halt continuous output

--- HELP ---
EXIT - Quits the command line
HELP - prints this message
LOAD <CMD | KERNEL> <filename> - loads a set of commands or a text kernel from file
LOAD TABLE <filename> [<table name>] - loads a star table from a CSV file
SET <option> <value> - sets the value of a particular option
GET <option> - prints the value of a particular option
SHOW <TABLES | FRAMES | BODIES | SAT | CALC> - prints the available table, frame, body, satellite, or custom calc object names
STAR INFO <catalog number> - prints information for a star with the given catalog number
STAR AZEL <catalog number> <CONT | count> <ISO time | NOW> - prints the observation position for the star with the given catalog number
BODY INFO <naif id> - prints information for a body with the given NAIF ID
BODY AZEL <naif id> <CONT | count> <ISO time | NOW> - prints the observation position for the body with the given NAIF ID
SAT ADD <id> - adds a satellite with the given ID to the internal database (non persistent)
SAT REM <id> - removes the satellite with the given ID from the internal database
SAT INFO <id> - prints information for a satellite added with the given ID
SAT AZEL <id> <CONT | count> <ISO time | NOW> - prints the observation position for the satellite added with the given ID
CALC ADD <id> <RANGE> <RA deg> <DEC deg> [<RA_PM deg/yr> <DEC_PM deg/yr>] [<RANGE UNITS>] - adds a body with the given ID to the internal database (non persistent); RANGE is measured from the observer body center in KM unless units such as M, AU or PARSECS are given
CALC REM <id> - removes a body with the given ID from the internal database
CALC INFO <id> - prints information for a custom calculated body with the given ID
CALC AZEL <id> <CONT | count> <ISO time | NOW> - prints the observation position for the calculated body added with the given ID
";

pub fn help(out: &mut dyn Write) -> anyhow::Result<()> {
    writeln!(out, "{}", HELP_TEXT)?;
    writeln!(out, "--- OPTIONS ---")?;
    for key in OptionKey::ALL {
        writeln!(out, "{}", key)?;
    }
    Ok(())
}

fn option_key(name: &str) -> anyhow::Result<OptionKey> {
    OptionKey::parse(name).ok_or_else(|| anyhow::anyhow!("Unrecognized option: '{}'", name))
}

pub fn set(session: &mut Session, command: &ParsedCommand, out: &mut dyn Write) -> anyhow::Result<()> {
    command.expect_args(2)?;
    let key = option_key(&command.arguments[0])?;
    let raw = &command.arguments[1];

    let raw = if key == OptionKey::StarTable {
        let tables = session.pool.star_tables();
        let Some(table) = tables.iter().find(|t| t.eq_ignore_ascii_case(raw)) else {
            anyhow::bail!("Table '{}' could not be found. Try SHOW TABLES?", raw);
        };
        table.clone()
    } else {
        raw.to_string()
    };

    let value = session.options.set(key, &raw)?;
    writeln!(out, "{} = {}", key, value)?;
    Ok(())
}

pub fn get(session: &mut Session, command: &ParsedCommand, out: &mut dyn Write) -> anyhow::Result<()> {
    command.expect_args(1)?;
    let key = option_key(&command.arguments[0])?;

    match session.options.get(key) {
        Some(value) => writeln!(out, "{} is {}", key.label(), value)?,
        None => writeln!(out, "{} is not set to anything.", key.label())?,
    }
    Ok(())
}

pub fn load(session: &mut Session, command: &ParsedCommand, out: &mut dyn Write) -> anyhow::Result<Flow> {
    let Some(kind) = command.action() else {
        anyhow::bail!("This command requires 2 arguments");
    };

    match kind.as_str() {
        "CMD" => {
            command.expect_operands(1)?;
            return repl::run_script(session, Path::new(&command.arguments[1]), out);
        }
        "KERNEL" => {
            command.expect_operands(1)?;
            let file = &command.arguments[1];
            session.pool.load_kernel_file(file)?;
            writeln!(out, "Loaded kernel for file '{}'", file)?;
        }
        "TABLE" => {
            command.expect_operands_between(1, 2)?;
            let file = &command.arguments[1];
            let name = match command.arg(2) {
                Some(name) => name.to_uppercase(),
                None => table_name_from_path(Path::new(file))?,
            };
            let rows = session.pool.load_star_table(&name, file)?;
            writeln!(out, "Loaded {} stars into table '{}'", rows, name)?;
        }
        _ => anyhow::bail!("Unrecognized option: '{}'", command.arguments[0]),
    }
    Ok(Flow::Continue)
}

fn table_name_from_path(path: &Path) -> anyhow::Result<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_uppercase)
        .ok_or_else(|| anyhow::anyhow!("Cannot derive a table name from '{}'", path.display()))
}

pub fn show(session: &mut Session, command: &ParsedCommand, out: &mut dyn Write) -> anyhow::Result<()> {
    command.expect_args(1)?;

    match command.arguments[0].to_uppercase().as_str() {
        "TABLES" => {
            let tables = session.pool.star_tables();
            if tables.is_empty() {
                writeln!(out, "No tables found. Try LOAD TABLE?")?;
            }
            for table in tables {
                writeln!(out, "{}", table)?;
            }
        }
        "FRAMES" => {
            for (kind, frames) in [
                ("built-in", session.pool.builtin_frames()),
                ("kernel", session.pool.kernel_frames()),
            ] {
                writeln!(out, "Printing {} '{}' frames:", frames.len(), kind)?;
                for frame in frames {
                    writeln!(out, "{}: {}", frame.id, frame.name)?;
                }
            }
        }
        "BODIES" => {
            for (id, name) in session.pool.known_bodies() {
                writeln!(out, "{}: {}", id, name)?;
            }
        }
        "SAT" => {
            if session.satellites.is_empty() {
                writeln!(out, "No satellites added")?;
            } else {
                writeln!(out, "Showing {} satellite IDs:", session.satellites.len())?;
                for id in sorted_keys(session.satellites.keys()) {
                    writeln!(out, "{}", id)?;
                }
            }
        }
        "CALC" => {
            if session.customs.is_empty() {
                writeln!(out, "No custom objects added")?;
            } else {
                writeln!(out, "Showing {} custom body IDs:", session.customs.len())?;
                for id in sorted_keys(session.customs.keys()) {
                    writeln!(out, "{}", id)?;
                }
            }
        }
        other => anyhow::bail!("Unrecognized option: '{}'", other),
    }
    Ok(())
}

fn sorted_keys<'a>(keys: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut keys: Vec<&str> = keys.collect();
    keys.sort_unstable();
    keys
}

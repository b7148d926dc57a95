use crate::command::ParsedCommand;
use crate::options::{OptionKey, parse_finite};
use crate::session::Session;
use gate_core::GateError;
use gate_core::records::{CustomObject, SatelliteRecord};
use gate_core::toolkit::{Toolkit, Unit};
use std::io::{BufRead, Write};

pub(super) fn parse_number<T: std::str::FromStr>(what: &str, raw: &str) -> Result<T, GateError> {
    raw.parse().map_err(|_| GateError::invalid_number(what, raw))
}

pub fn star_info(session: &mut Session, command: &ParsedCommand, out: &mut dyn Write) -> anyhow::Result<()> {
    command.expect_operands(1)?;
    let catalog = &command.arguments[1];
    let number: i64 = parse_number("Catalog number", catalog)?;
    let table = session.options.require_text(OptionKey::StarTable)?;

    let stars = session.pool.find_stars(table, number)?;
    if stars.is_empty() {
        anyhow::bail!("No stars found in table '{}' with catalog number '{}'", table, catalog);
    }

    for (i, star) in stars.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        writeln!(out, "{}", star.describe())?;
    }
    Ok(())
}

pub fn body_info(session: &mut Session, command: &ParsedCommand, out: &mut dyn Write) -> anyhow::Result<()> {
    command.expect_operands(1)?;
    let raw = &command.arguments[1];
    let id: i32 = parse_number("NAIF ID", raw)?;

    let name = session
        .pool
        .body_name(id)
        .ok_or_else(|| anyhow::anyhow!("No body found with NAIF ID '{}'. Try LOAD KERNEL?", raw))?;

    writeln!(out, "Info for body with NAIF ID '{}':\n", raw)?;
    writeln!(out, "Body name: {}", name)?;
    if let Some([a, b, c]) = session.pool.body_radii(id) {
        writeln!(out, "Radii: {:.6} {:.6} {:.6} km", a, b, c)?;
    }
    if let Some(frame) = session.pool.resolve_body_fixed_frame(id) {
        writeln!(out, "Body-fixed frame: {} ({})", frame.name, frame.id)?;
    }
    Ok(())
}

fn read_element_line(input: &mut dyn BufRead) -> anyhow::Result<String> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        anyhow::bail!("Expected two lines of element data");
    }
    Ok(line.trim_end().to_string())
}

pub fn sat_add(
    session: &mut Session,
    command: &ParsedCommand,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    command.expect_operands(1)?;
    let id = &command.arguments[1];

    writeln!(out, "Paste TLE data below:")?;
    out.flush()?;
    let line1 = read_element_line(input)?;
    let line2 = read_element_line(input)?;
    let record = SatelliteRecord::from_tle(&line1, &line2)?;

    if session.satellites.contains_key(id) {
        writeln!(out, "WARNING: Replacing existing data entry '{}'", id)?;
    }
    tracing::debug!(satellite = %id, deep_space = record.deep_space, "Adding satellite");
    session.satellites.put(id.as_str(), record);
    writeln!(out, "Added satellite '{}' to the database", id)?;
    Ok(())
}

pub fn sat_rem(session: &mut Session, command: &ParsedCommand, out: &mut dyn Write) -> anyhow::Result<()> {
    command.expect_operands(1)?;
    let id = &command.arguments[1];

    session
        .satellites
        .remove(id)
        .ok_or_else(|| GateError::record_not_found("satellite", id.as_str()))?;
    writeln!(out, "Successfully removed satellite '{}'", id)?;
    Ok(())
}

pub fn sat_info(session: &mut Session, command: &ParsedCommand, out: &mut dyn Write) -> anyhow::Result<()> {
    command.expect_operands(1)?;
    let id = &command.arguments[1];

    let record = session
        .satellites
        .get(id)
        .ok_or_else(|| GateError::record_not_found("satellite", id.as_str()).with_hint("SAT ADD"))?;
    writeln!(out, "{}", record.describe(id))?;
    Ok(())
}

/// `CALC ADD <id> <range> <ra> <dec> [<ra_pm> <dec_pm>] [<units>]`
pub fn calc_add(session: &mut Session, command: &ParsedCommand, out: &mut dyn Write) -> anyhow::Result<()> {
    let operands = command.arguments.len().saturating_sub(1);
    if !(4..=7).contains(&operands) {
        anyhow::bail!("Unrecognized command format");
    }

    // An odd operand count ends with the range units
    let units = if operands % 2 == 1 {
        range_units(session, &command.arguments[operands])?
    } else {
        Unit::Km
    };
    let with_motion = operands >= 6;

    let id = &command.arguments[1];
    let mut object = CustomObject {
        range: parse_finite("Range", &command.arguments[2])?,
        units,
        ra: parse_finite("Right ascension", &command.arguments[3])?,
        dec: parse_finite("Declination", &command.arguments[4])?,
        ra_pm: 0.0,
        dec_pm: 0.0,
    };
    if with_motion {
        object.ra_pm = parse_finite("Right ascension proper motion", &command.arguments[5])?;
        object.dec_pm = parse_finite("Declination proper motion", &command.arguments[6])?;
    }

    if session.customs.contains_key(id) {
        writeln!(out, "WARNING: Replacing existing data entry '{}'", id)?;
    }
    session.customs.put(id.as_str(), object);
    writeln!(out, "Added '{}' to the custom object database", id)?;
    Ok(())
}

/// A length unit the observer radius can be converted into
fn range_units(session: &Session, raw: &str) -> anyhow::Result<Unit> {
    let units: Unit = raw.parse()?;
    session.pool.convert_units(1.0, Unit::Km, units)?;
    Ok(units)
}

pub fn calc_rem(session: &mut Session, command: &ParsedCommand, out: &mut dyn Write) -> anyhow::Result<()> {
    command.expect_operands(1)?;
    let id = &command.arguments[1];

    session
        .customs
        .remove(id)
        .ok_or_else(|| GateError::record_not_found("object", id.as_str()))?;
    writeln!(out, "Successfully removed custom object '{}'", id)?;
    Ok(())
}

pub fn calc_info(session: &mut Session, command: &ParsedCommand, out: &mut dyn Write) -> anyhow::Result<()> {
    command.expect_operands(1)?;
    let id = &command.arguments[1];

    let object = session
        .customs
        .get(id)
        .ok_or_else(|| GateError::record_not_found("object", id.as_str()).with_hint("CALC ADD"))?;
    writeln!(out, "{}", object.describe(id))?;
    Ok(())
}

///! AZEL commands: track a target from the configured observer

use super::registry::parse_number;
use crate::command::ParsedCommand;
use crate::interrupt::InterruptState;
use crate::options::OptionKey;
use crate::session::Session;
use gate_core::GateError;
use gate_core::azel::{AzElSelection, Target};
use gate_core::time::Epoch;
use gate_core::toolkit::{KernelPool, Toolkit};
use gate_core::topo::ObserverSite;
use gate_core::tracking::{LoopMode, TrackingLoop, TrackingTick};
use std::io::Write;

pub const STAR_FRAME: &str = "STAR_AZEL_TOPO";
pub const BODY_FRAME: &str = "BODY_AZEL_TOPO";
pub const SAT_FRAME: &str = "SAT_AZEL_TOPO";
pub const CALC_FRAME: &str = "CALC_AZEL_TOPO";

/// `<id> <CONT|count> <time>` following the action word
struct AzelRequest {
    id: String,
    mode: LoopMode,
    start: Epoch,
}

impl AzelRequest {
    /// The count and time are validated before anything else is looked up
    fn parse(command: &ParsedCommand) -> anyhow::Result<Self> {
        command.expect_operands_between(3, usize::MAX)?;
        let mode: LoopMode = command.arguments[2].parse()?;
        let start = Epoch::parse(&command.arguments[3..].join(" "))?;

        Ok(AzelRequest {
            id: command.arguments[1].clone(),
            mode,
            start,
        })
    }
}

fn print_tick(out: &mut dyn Write, tick: &TrackingTick<'_>) -> std::io::Result<()> {
    writeln!(out, "{}:", tick.epoch.format_utc())?;
    for observation in tick.observations {
        writeln!(
            out,
            "Azimuth={:.6} Elevation={:.6}",
            observation.azimuth.unwrap_or_default(),
            observation.elevation.unwrap_or_default()
        )?;
    }
    writeln!(out)?;
    out.flush()
}

/// Run the loop with the interrupt handler switched to cancellation
fn track(
    pool: &mut KernelPool,
    interrupt: &InterruptState,
    tracker: &TrackingLoop,
    site: &ObserverSite,
    target: Target<'_>,
    start: Epoch,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let _tracking = interrupt.begin_tracking();

    let summary = tracker.run(pool, site, target, start, AzElSelection::ANGLES, |tick| {
        print_tick(out, tick)?;
        Ok(())
    })?;

    tracing::debug!(
        frame = %site.frame_name,
        rounds = summary.rounds,
        last_epoch = %summary.last_epoch,
        "Tracking finished"
    );
    Ok(())
}

pub fn star_azel(session: &mut Session, command: &ParsedCommand, out: &mut dyn Write) -> anyhow::Result<()> {
    let request = AzelRequest::parse(command)?;
    let number: i64 = parse_number("Catalog number", &request.id)?;
    let table = session.options.require_text(OptionKey::StarTable)?.to_string();

    let stars = session.pool.find_stars(&table, number)?;
    if stars.is_empty() {
        anyhow::bail!("No stars found in table '{}' with catalog number '{}'", table, request.id);
    }

    let site = session.observer_site(STAR_FRAME)?;
    let tracker = session.tracker(request.mode);
    writeln!(out, "Printing azimuth/elevation for star '{}' in table '{}'\n", request.id, table)?;

    track(
        &mut session.pool,
        &session.interrupt,
        &tracker,
        &site,
        Target::Stars(&stars),
        request.start,
        out,
    )
}

pub fn body_azel(session: &mut Session, command: &ParsedCommand, out: &mut dyn Write) -> anyhow::Result<()> {
    let request = AzelRequest::parse(command)?;
    let id: i32 = parse_number("NAIF ID", &request.id)?;
    let name = session
        .pool
        .body_name(id)
        .ok_or_else(|| anyhow::anyhow!("No body found with NAIF ID '{}'. Try LOAD KERNEL?", request.id))?;

    let site = session.observer_site(BODY_FRAME)?;
    let observer = session.options.require_text(OptionKey::ObserverBody)?.to_string();
    let tracker = session.tracker(request.mode);
    writeln!(out, "Printing azimuth/elevation for body '{}' ({})\n", request.id, name)?;

    let target = Target::Body {
        target: &name,
        observer: &observer,
    };
    track(
        &mut session.pool,
        &session.interrupt,
        &tracker,
        &site,
        target,
        request.start,
        out,
    )
}

pub fn sat_azel(session: &mut Session, command: &ParsedCommand, out: &mut dyn Write) -> anyhow::Result<()> {
    let request = AzelRequest::parse(command)?;
    let record = session
        .satellites
        .get(&request.id)
        .ok_or_else(|| GateError::record_not_found("satellite", request.id.as_str()).with_hint("SAT ADD"))?;

    let site = session.observer_site(SAT_FRAME)?;
    let tracker = session.tracker(request.mode);
    writeln!(out, "Printing azimuth/elevation for satellite '{}'\n", request.id)?;
    tracing::debug!(satellite = %request.id, model = ?record.model(), "Propagating element set");

    track(
        &mut session.pool,
        &session.interrupt,
        &tracker,
        &site,
        Target::Satellite(record),
        request.start,
        out,
    )
}

pub fn calc_azel(session: &mut Session, command: &ParsedCommand, out: &mut dyn Write) -> anyhow::Result<()> {
    let request = AzelRequest::parse(command)?;
    let object = session
        .customs
        .get(&request.id)
        .ok_or_else(|| GateError::record_not_found("object", request.id.as_str()).with_hint("CALC ADD"))?;

    let site = session.observer_site(CALC_FRAME)?;
    let tracker = session.tracker(request.mode);
    writeln!(out, "Printing azimuth/elevation for custom ID '{}'\n", request.id)?;

    track(
        &mut session.pool,
        &session.interrupt,
        &tracker,
        &site,
        Target::Custom(object),
        request.start,
        out,
    )
}

#[cfg(test)]
mod tests {
    use super::super::registry::tests::ISS_TLE;
    use super::super::tests::{run, run_with_input};
    use super::*;
    use gate_core::toolkit::FrameClass;
    use std::time::Duration;

    fn observer_session() -> Session {
        let mut session = Session::new();
        session.tracking_interval = Duration::ZERO;
        session.options.set(OptionKey::ObserverLatitude, "40").unwrap();
        session.options.set(OptionKey::ObserverLongitude, "-75").unwrap();
        session
    }

    fn rounds(output: &str) -> usize {
        output.lines().filter(|line| line.ends_with("UTC:")).count()
    }

    #[test]
    fn test_calc_azel_bounded() {
        let mut session = observer_session();
        run(&mut session, "CALC ADD beacon 1e9 120 30").0.unwrap();

        let (result, output) = run(&mut session, "CALC AZEL beacon 3 2024-03-20T12:00:00");
        result.unwrap();
        assert!(output.starts_with("Printing azimuth/elevation for custom ID 'beacon'\n\n2024-03-20 12:00:00.0000 UTC:\n"));
        assert_eq!(rounds(&output), 3);
        assert_eq!(output.matches("Azimuth=").count(), 3);
        assert!(session.pool.used_frame_ids(FrameClass::All).is_empty());
        assert!(!session.interrupt.is_tracking());
    }

    #[test]
    fn test_continuous_run_stops_on_cancel() {
        let mut session = observer_session();
        run(&mut session, "CALC ADD beacon 1e9 120 30").0.unwrap();

        // Requests made before tracking begins are dropped, so cancel from a writer
        // that fires once the first observation is printed
        struct CancellingWriter {
            buffer: Vec<u8>,
            interrupt: InterruptState,
            fired: bool,
        }
        impl Write for CancellingWriter {
            fn write(&mut self, data: &[u8]) -> std::io::Result<usize> {
                self.buffer.extend_from_slice(data);
                if !self.fired && self.buffer.windows(8).any(|w| w == b"Azimuth=") {
                    assert_eq!(self.interrupt.handle(), crate::interrupt::InterruptAction::CancelTracking);
                    self.fired = true;
                }
                Ok(data.len())
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let mut out = CancellingWriter {
            buffer: Vec::new(),
            interrupt: session.interrupt.clone(),
            fired: false,
        };
        let command = ParsedCommand::parse("CALC AZEL beacon CONT NOW").unwrap();
        calc_azel(&mut session, &command, &mut out).unwrap();

        let output = String::from_utf8(out.buffer).unwrap();
        assert_eq!(rounds(&output), 1);
        assert!(session.pool.used_frame_ids(FrameClass::All).is_empty());
    }

    #[test]
    fn test_sat_azel() {
        let mut session = observer_session();
        run_with_input(&mut session, "SAT ADD ISS", ISS_TLE).0.unwrap();

        let (result, output) = run(&mut session, "SAT AZEL ISS 2 2020-07-12T22:00:00");
        result.unwrap();
        assert!(output.starts_with("Printing azimuth/elevation for satellite 'ISS'\n\n"));
        assert_eq!(rounds(&output), 2);
    }

    #[test]
    fn test_body_azel_sun() {
        let mut session = observer_session();
        let (result, output) = run(&mut session, "BODY AZEL 10 1 2024-06-21T12:00:00");
        result.unwrap();
        assert!(output.starts_with("Printing azimuth/elevation for body '10' (SUN)\n\n"));
        assert_eq!(rounds(&output), 1);
    }

    #[test]
    fn test_count_checked_before_lookup() {
        let mut session = observer_session();
        let err = run(&mut session, "SAT AZEL missing often NOW").0.unwrap_err();
        assert_eq!(err.to_string(), "Count 'often' is not a valid number");

        let err = run(&mut session, "SAT AZEL missing 1 NOW").0.unwrap_err();
        assert_eq!(err.to_string(), "No satellite in database called 'missing'. Try SAT ADD?");
        let err = run(&mut session, "CALC AZEL missing 1 NOW").0.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<GateError>(),
            Some(GateError::RecordNotFound { kind: "object", .. })
        ));

        let err = run(&mut session, "CALC AZEL x 1 yesterday").0.unwrap_err();
        assert!(matches!(err.downcast_ref::<GateError>(), Some(GateError::InvalidTime(_))));
    }

    #[test]
    fn test_missing_observer_options() {
        let mut session = Session::new();
        run(&mut session, "CALC ADD beacon 1 0 0").0.unwrap();
        let err = run(&mut session, "CALC AZEL beacon 1 NOW").0.unwrap_err();
        assert!(err.to_string().contains("Try SET OBSERVER_LATITUDE <value>?"));
        assert!(session.pool.used_frame_ids(FrameClass::All).is_empty());
    }

    #[test]
    fn test_failed_output_ends_continuous_run() {
        let mut session = observer_session();
        run(&mut session, "CALC ADD beacon 1e9 120 30").0.unwrap();

        // Accepts the header up to its blank line, then behaves like a closed pipe
        struct ClosedAfterHeader {
            buffer: Vec<u8>,
            failures: usize,
        }
        impl Write for ClosedAfterHeader {
            fn write(&mut self, data: &[u8]) -> std::io::Result<usize> {
                if self.buffer.ends_with(b"\n\n") {
                    self.failures += 1;
                    return Err(std::io::ErrorKind::BrokenPipe.into());
                }
                self.buffer.extend_from_slice(data);
                Ok(data.len())
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let mut out = ClosedAfterHeader {
            buffer: Vec::new(),
            failures: 0,
        };
        let command = ParsedCommand::parse("CALC AZEL beacon CONT NOW").unwrap();
        let err = calc_azel(&mut session, &command, &mut out).unwrap_err();

        assert!(matches!(err.downcast_ref::<GateError>(), Some(GateError::Io(_))));
        assert_eq!(out.failures, 1);
        assert!(session.pool.used_frame_ids(FrameClass::All).is_empty());
        assert!(!session.interrupt.is_tracking());
    }
}

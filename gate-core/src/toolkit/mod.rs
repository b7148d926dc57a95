///! Astrodynamics toolkit boundary
///!
///! The observation engine never computes ephemerides, frame chains or orbit
///! propagation itself. It consumes them through the `Toolkit` trait, which is
///! a stateful external service: frame names and ids live in the toolkit's
///! runtime pool and may be changed by other callers between two requests.
///!
///! `KernelPool` is the in-process implementation used by the CLI and tests.

mod ephemeris;
mod kernel;
mod pool;
mod rotation;
mod units;

pub use kernel::{PoolValue, parse_assignments, parse_kernel_text};
pub use pool::KernelPool;
pub use rotation::{axis_rotation, euler_to_matrix};
pub use units::Unit;

use crate::error::{GateError, Result};
use crate::stars::StarRecord;
use crate::time::Epoch;
use nalgebra::{Matrix3, Vector3};
use std::f64::consts::TAU;
use std::fmt;
use std::str::FromStr;

pub const SPEED_OF_LIGHT_KM_S: f64 = 299_792.458;

/// Frame class numbers as used in `FRAME_<id>_CLASS` assignments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameClass {
    Inertial,
    Pck,
    Ck,
    Tk,
    Dynamic,
    Switch,
    All,
}

impl FrameClass {
    pub fn code(&self) -> Option<i32> {
        match self {
            FrameClass::Inertial => Some(1),
            FrameClass::Pck => Some(2),
            FrameClass::Ck => Some(3),
            FrameClass::Tk => Some(4),
            FrameClass::Dynamic => Some(5),
            FrameClass::Switch => Some(6),
            FrameClass::All => None,
        }
    }

    pub fn matches(&self, code: i32) -> bool {
        self.code().is_none_or(|c| c == code)
    }
}

/// A resolved frame: numeric id and name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameInfo {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AngleUnits {
    Degrees,
    Radians,
}

impl AngleUnits {
    pub fn as_str(&self) -> &'static str {
        match self {
            AngleUnits::Degrees => "DEGREES",
            AngleUnits::Radians => "RADIANS",
        }
    }
}

/// Definition of a fixed-offset ("TK") frame using an Euler-angle spec
#[derive(Debug, Clone, PartialEq)]
pub struct FrameDefinition {
    pub name: String,
    pub id: i32,
    pub center: i32,
    pub relative: String,
    pub angles: [f64; 3],
    pub axes: [u8; 3],
    pub units: AngleUnits,
}

impl FrameDefinition {
    /// Kernel pool assignments that define this frame
    pub fn kernel_lines(&self) -> Vec<String> {
        let (name, id) = (&self.name, self.id);
        vec![
            format!("FRAME_{} = {}", name, id),
            format!("FRAME_{}_NAME = '{}'", id, name),
            format!("FRAME_{}_CLASS = 4", id),
            format!("FRAME_{}_CENTER = {}", id, self.center),
            format!("FRAME_{}_CLASS_ID = {}", id, id),
            format!("TKFRAME_{}_RELATIVE = '{}'", id, self.relative),
            format!("TKFRAME_{}_SPEC = 'ANGLES'", id),
            format!("TKFRAME_{}_UNITS = '{}'", id, self.units.as_str()),
            format!(
                "TKFRAME_{}_AXES = ({}, {}, {})",
                id, self.axes[0], self.axes[1], self.axes[2]
            ),
            format!(
                "TKFRAME_{}_ANGLES = ({:.10}, {:.10}, {:.10})",
                id, self.angles[0], self.angles[1], self.angles[2]
            ),
        ]
    }

    /// Every pool variable name written by `kernel_lines` for a frame
    pub fn pool_keys(name: &str, id: i32) -> Vec<String> {
        vec![
            format!("FRAME_{}", name),
            format!("FRAME_{}_NAME", id),
            format!("FRAME_{}_CLASS", id),
            format!("FRAME_{}_CENTER", id),
            format!("FRAME_{}_CLASS_ID", id),
            format!("TKFRAME_{}_RELATIVE", id),
            format!("TKFRAME_{}_SPEC", id),
            format!("TKFRAME_{}_UNITS", id),
            format!("TKFRAME_{}_AXES", id),
            format!("TKFRAME_{}_ANGLES", id),
        ]
    }
}

/// Aberration correction applied to a state-vector request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aberration {
    None,
    Lt,
    LtS,
    Cn,
    CnS,
}

impl Aberration {
    pub fn light_time(&self) -> bool {
        !matches!(self, Aberration::None)
    }

    pub fn converged(&self) -> bool {
        matches!(self, Aberration::Cn | Aberration::CnS)
    }

    pub fn stellar(&self) -> bool {
        matches!(self, Aberration::LtS | Aberration::CnS)
    }
}

impl FromStr for Aberration {
    type Err = GateError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        match normalized.to_uppercase().as_str() {
            "NONE" => Ok(Aberration::None),
            "LT" => Ok(Aberration::Lt),
            "LT+S" => Ok(Aberration::LtS),
            "CN" => Ok(Aberration::Cn),
            "CN+S" => Ok(Aberration::CnS),
            _ => Err(GateError::Kernel(format!("unknown aberration correction '{}'", s))),
        }
    }
}

impl fmt::Display for Aberration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Aberration::None => "NONE",
            Aberration::Lt => "LT",
            Aberration::LtS => "LT+S",
            Aberration::Cn => "CN",
            Aberration::CnS => "CN+S",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateVector {
    pub position: Vector3<f64>,
    pub velocity: Vector3<f64>,
    pub light_time: f64,
}

/// Which orbit model an element set is propagated with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropagationModel {
    NearEarth,
    DeepSpace,
}

/// Orbits with a period of at least this many minutes use the deep-space model
pub const DEEP_SPACE_PERIOD_MINUTES: f64 = 225.0;

impl PropagationModel {
    /// Classify an element set by its Brouwer mean motion, the one the
    /// propagator itself branches on
    pub fn classify(elements: &sgp4::Elements) -> Result<Self> {
        let period = brouwer_period_minutes(elements)?;
        Ok(if period >= DEEP_SPACE_PERIOD_MINUTES {
            PropagationModel::DeepSpace
        } else {
            PropagationModel::NearEarth
        })
    }
}

/// Orbital period in minutes from the un-Kozai'd mean motion
pub fn brouwer_period_minutes(elements: &sgp4::Elements) -> Result<f64> {
    let orbit = sgp4::Orbit::from_kozai_elements(
        &sgp4::WGS84,
        elements.inclination.to_radians(),
        elements.right_ascension.to_radians(),
        elements.eccentricity,
        elements.argument_of_perigee.to_radians(),
        elements.mean_anomaly.to_radians(),
        elements.mean_motion * (std::f64::consts::PI / 720.0),
    )
    .map_err(|e| GateError::InvalidElementSet(e.to_string()))?;

    Ok(TAU / orbit.mean_motion)
}

/// Output of `rectangular_to_range_az_el`: range plus the raw angles in radians
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawAzEl {
    pub range: f64,
    pub azimuth: f64,
    pub elevation: f64,
}

/// Range, right ascension in [0, 2pi) and declination of a rectangular vector
pub fn rectangular_to_radec(rec: &Vector3<f64>) -> RawAzEl {
    let range = rec.norm();
    if range == 0.0 {
        return RawAzEl {
            range: 0.0,
            azimuth: 0.0,
            elevation: 0.0,
        };
    }

    let azimuth = rec.y.atan2(rec.x).rem_euclid(TAU);
    let elevation = rec.z.atan2((rec.x * rec.x + rec.y * rec.y).sqrt());

    RawAzEl {
        range,
        azimuth,
        elevation,
    }
}

/// Rectangular vector from range, right ascension and declination (radians)
pub fn radec_to_rectangular(range: f64, ra: f64, dec: f64) -> Vector3<f64> {
    Vector3::new(
        range * dec.cos() * ra.cos(),
        range * dec.cos() * ra.sin(),
        range * dec.sin(),
    )
}

pub trait Toolkit {
    /// Body-fixed frame associated with a body
    fn resolve_body_fixed_frame(&self, body_id: i32) -> Option<FrameInfo>;

    /// Ids of every kernel-defined frame of the given class
    fn used_frame_ids(&self, class: FrameClass) -> Vec<i32>;

    fn define_frame(&mut self, definition: &FrameDefinition) -> Result<()>;

    fn undefine_frame(&mut self, keys: &[String]);

    fn resolve_frame_name(&self, name: &str) -> Option<i32>;

    fn frame_name(&self, id: i32) -> Option<String>;

    fn state_vector(
        &self,
        target: &str,
        epoch: Epoch,
        frame: &str,
        observer: &str,
        correction: Aberration,
    ) -> Result<StateVector>;

    /// Matrix rotating vectors from `from` into `to` at `epoch`
    fn frame_transform_matrix(&self, from: &str, to: &str, epoch: Epoch) -> Result<Matrix3<f64>>;

    fn rectangular_to_range_az_el(&self, rec: &Vector3<f64>) -> RawAzEl {
        rectangular_to_radec(rec)
    }

    fn convert_units(&self, value: f64, from: Unit, to: Unit) -> Result<f64> {
        units::convert(value, from, to)
    }

    /// Inertial state of an orbiting object described by an element set
    fn propagate_elements(
        &self,
        elements: &sgp4::Elements,
        model: PropagationModel,
        epoch: Epoch,
    ) -> Result<StateVector>;

    fn body_id(&self, name: &str) -> Option<i32>;

    fn body_name(&self, id: i32) -> Option<String>;

    /// Tri-axial radii in km
    fn body_radii(&self, id: i32) -> Option<[f64; 3]>;

    fn known_bodies(&self) -> Vec<(i32, String)>;

    fn builtin_frames(&self) -> Vec<FrameInfo>;

    /// Frames defined through pool assignments, topocentric frames included
    fn kernel_frames(&self) -> Vec<FrameInfo>;

    fn star_tables(&self) -> Vec<String>;

    fn find_stars(&self, table: &str, catalog_number: i64) -> Result<Vec<StarRecord>>;
}

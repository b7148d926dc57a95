///! In-process kernel pool
///!
///! Holds text-kernel variables, star tables and the built-in frame and body
///! tables. Frame definitions written through `define_frame` land in the same
///! variable pool as `LOAD KERNEL` assignments, so both see one namespace.

use super::ephemeris::{self, EARTH, MOON, SUN};
use super::kernel::{Assignment, PoolValue, parse_assignments, parse_kernel_text};
use super::rotation::{axis_rotation, euler_to_matrix};
use super::{
    Aberration, FrameClass, FrameDefinition, FrameInfo, PropagationModel, StateVector, Toolkit,
};
use crate::error::{GateError, Result};
use crate::stars::{StarRecord, load_star_csv};
use crate::time::Epoch;
use nalgebra::{Matrix3, Vector3};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

const MARS: i32 = 499;

/// Longest chain of relative frames followed before giving up
const MAX_FRAME_DEPTH: usize = 10;

struct BuiltinFrame {
    id: i32,
    name: &'static str,
    center: i32,
    class: FrameClass,
}

const BUILTIN_FRAMES: &[BuiltinFrame] = &[
    BuiltinFrame {
        id: 1,
        name: "J2000",
        center: 0,
        class: FrameClass::Inertial,
    },
    BuiltinFrame {
        id: 10013,
        name: "IAU_EARTH",
        center: EARTH,
        class: FrameClass::Pck,
    },
    BuiltinFrame {
        id: 10014,
        name: "IAU_MARS",
        center: MARS,
        class: FrameClass::Pck,
    },
    BuiltinFrame {
        id: 10020,
        name: "IAU_MOON",
        center: MOON,
        class: FrameClass::Pck,
    },
];

const BUILTIN_BODIES: &[(i32, &str)] = &[
    (0, "SOLAR SYSTEM BARYCENTER"),
    (3, "EARTH BARYCENTER"),
    (4, "MARS BARYCENTER"),
    (SUN, "SUN"),
    (MOON, "MOON"),
    (EARTH, "EARTH"),
    (MARS, "MARS"),
];

const BUILTIN_RADII: &[(i32, [f64; 3])] = &[
    (SUN, [696_000.0, 696_000.0, 696_000.0]),
    (MOON, [1737.4, 1737.4, 1737.4]),
    (EARTH, [6378.1366, 6378.1366, 6356.7519]),
    (MARS, [3396.19, 3396.19, 3376.20]),
];

/// IAU rotation elements: pole right ascension and declination (deg, with
/// rates per Julian century) and prime meridian (deg, rate per day)
struct RotationElements {
    alpha: (f64, f64),
    delta: (f64, f64),
    meridian: (f64, f64),
}

fn rotation_elements(body: i32) -> Option<RotationElements> {
    match body {
        EARTH => Some(RotationElements {
            alpha: (0.0, -0.641),
            delta: (90.0, -0.557),
            meridian: (190.147, 360.985_623_5),
        }),
        MOON => Some(RotationElements {
            alpha: (269.9949, 0.0031),
            delta: (66.5392, 0.0130),
            meridian: (38.3213, 13.176_358_15),
        }),
        MARS => Some(RotationElements {
            alpha: (317.681_43, -0.1061),
            delta: (52.886_50, -0.0609),
            meridian: (176.630, 350.891_982_26),
        }),
        _ => None,
    }
}

/// Rotation from J2000 into an IAU body-fixed frame: `[W]_3 [90-dec]_1 [90+ra]_3`
fn iau_rotation(body: i32, epoch: Epoch) -> Option<Matrix3<f64>> {
    let elements = rotation_elements(body)?;
    let t = epoch.centuries_since_j2000();
    let d = epoch.days_since_j2000();

    let alpha = elements.alpha.0 + elements.alpha.1 * t;
    let delta = elements.delta.0 + elements.delta.1 * t;
    let w = (elements.meridian.0 + elements.meridian.1 * d).rem_euclid(360.0);

    Some(
        axis_rotation(3, w.to_radians())
            * axis_rotation(1, (90.0 - delta).to_radians())
            * axis_rotation(3, (90.0 + alpha).to_radians()),
    )
}

#[derive(Default)]
pub struct KernelPool {
    variables: HashMap<String, PoolValue>,
    star_tables: BTreeMap<String, Vec<StarRecord>>,
}

impl KernelPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&PoolValue> {
        self.variables.get(&name.to_uppercase())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    fn number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(PoolValue::first_number)
    }

    fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(PoolValue::first_text)
    }

    fn apply(&mut self, assignments: Vec<Assignment>) -> Result<usize> {
        let count = assignments.len();
        for assignment in assignments {
            match self.variables.get_mut(&assignment.name) {
                Some(existing) if assignment.append => existing.extend(assignment.value)?,
                _ => {
                    self.variables.insert(assignment.name, assignment.value);
                }
            }
        }
        Ok(count)
    }

    /// Load the data sections of a text kernel, returning the assignment count
    pub fn load_kernel_text(&mut self, text: &str) -> Result<usize> {
        let assignments = parse_kernel_text(text)?;
        self.apply(assignments)
    }

    pub fn load_kernel_file(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let count = self.load_kernel_text(&text)?;

        tracing::info!(path = %path.display(), assignments = count, "Loaded text kernel");
        Ok(count)
    }

    /// Register a star table under `name`, replacing any table of that name
    pub fn insert_star_table(&mut self, name: &str, stars: Vec<StarRecord>) {
        self.star_tables.insert(name.to_uppercase(), stars);
    }

    pub fn load_star_table(&mut self, name: &str, path: impl AsRef<Path>) -> Result<usize> {
        let stars = load_star_csv(path.as_ref())?;
        let count = stars.len();
        self.insert_star_table(name, stars);

        tracing::info!(table = %name.to_uppercase(), rows = count, "Loaded star table");
        Ok(count)
    }

    fn builtin_by_name(name: &str) -> Option<&'static BuiltinFrame> {
        BUILTIN_FRAMES.iter().find(|f| f.name == name)
    }

    fn builtin_by_id(id: i32) -> Option<&'static BuiltinFrame> {
        BUILTIN_FRAMES.iter().find(|f| f.id == id)
    }

    /// Pool body name/code pairs, later assignments first
    fn pool_body_codes(&self) -> Vec<(i32, String)> {
        let names = match self.get("NAIF_BODY_NAME") {
            Some(PoolValue::Text(names)) => names.clone(),
            _ => return Vec::new(),
        };
        let codes = match self.get("NAIF_BODY_CODE") {
            Some(PoolValue::Numeric(codes)) => codes.clone(),
            _ => return Vec::new(),
        };

        names
            .into_iter()
            .zip(codes)
            .rev()
            .map(|(name, code)| (code as i32, name.trim().to_uppercase()))
            .collect()
    }

    /// Rotation taking J2000 vectors into `frame`
    fn rotation_from_j2000(&self, frame: &str, epoch: Epoch, depth: usize) -> Result<Matrix3<f64>> {
        if depth > MAX_FRAME_DEPTH {
            return Err(GateError::Kernel(format!(
                "frame chain for {} is too deep",
                frame
            )));
        }

        let name = frame.trim().to_uppercase();
        if let Some(builtin) = Self::builtin_by_name(&name) {
            return match builtin.class {
                FrameClass::Inertial => Ok(Matrix3::identity()),
                _ => iau_rotation(builtin.center, epoch)
                    .ok_or_else(|| GateError::UnknownFrame(name.clone())),
            };
        }

        let id = self
            .resolve_frame_name(&name)
            .ok_or_else(|| GateError::UnknownFrame(name.clone()))?;

        let class = self.number(&format!("FRAME_{}_CLASS", id)).map(|c| c as i32);
        if class != FrameClass::Tk.code() {
            return Err(GateError::Kernel(format!(
                "frame {} has unsupported class {:?}",
                name, class
            )));
        }

        let (relative, to_relative) = self.tk_frame(id, &name)?;
        let relative_rotation = self.rotation_from_j2000(&relative, epoch, depth + 1)?;

        Ok(to_relative.transpose() * relative_rotation)
    }

    /// Relative frame name and the matrix taking TK-frame vectors into it
    fn tk_frame(&self, id: i32, name: &str) -> Result<(String, Matrix3<f64>)> {
        let missing = |key: &str| GateError::Kernel(format!("{} is missing {}", name, key));

        let relative = self
            .text(&format!("TKFRAME_{}_RELATIVE", id))
            .ok_or_else(|| missing("TKFRAME_RELATIVE"))?
            .to_string();

        let spec = self.text(&format!("TKFRAME_{}_SPEC", id)).unwrap_or("ANGLES");
        if !spec.eq_ignore_ascii_case("ANGLES") {
            return Err(GateError::Kernel(format!(
                "{} uses unsupported spec {}",
                name, spec
            )));
        }

        let angles = match self.get(&format!("TKFRAME_{}_ANGLES", id)) {
            Some(PoolValue::Numeric(values)) if values.len() == 3 => [values[0], values[1], values[2]],
            _ => return Err(missing("TKFRAME_ANGLES")),
        };
        let axes = match self.get(&format!("TKFRAME_{}_AXES", id)) {
            Some(PoolValue::Numeric(values)) if values.len() == 3 => {
                [values[0] as u8, values[1] as u8, values[2] as u8]
            }
            _ => return Err(missing("TKFRAME_AXES")),
        };

        let units = self.text(&format!("TKFRAME_{}_UNITS", id)).unwrap_or("RADIANS");
        let from: super::Unit = units.parse()?;
        let mut radians = [0.0; 3];
        for (out, angle) in radians.iter_mut().zip(angles) {
            *out = self.convert_units(angle, from, super::Unit::Radians)?;
        }

        Ok((relative, euler_to_matrix(radians, axes)))
    }

    fn require_body(&self, name: &str) -> Result<i32> {
        self.body_id(name)
            .ok_or_else(|| GateError::UnknownBody(name.to_string()))
    }
}

impl Toolkit for KernelPool {
    fn resolve_body_fixed_frame(&self, body_id: i32) -> Option<FrameInfo> {
        let key = format!("OBJECT_{}_FRAME", body_id);
        if let Some(value) = self.get(&key) {
            let id = match value {
                PoolValue::Numeric(ids) => ids.first().map(|id| *id as i32),
                PoolValue::Text(names) => names.first().and_then(|n| self.resolve_frame_name(n)),
            }?;
            let name = self.frame_name(id)?;
            return Some(FrameInfo { id, name });
        }

        if let Some(builtin) = BUILTIN_FRAMES
            .iter()
            .find(|f| f.center == body_id && f.class == FrameClass::Pck)
        {
            return Some(FrameInfo {
                id: builtin.id,
                name: builtin.name.to_string(),
            });
        }

        let name = format!("IAU_{}", self.body_name(body_id)?);
        let id = self.resolve_frame_name(&name)?;
        Some(FrameInfo { id, name })
    }

    fn used_frame_ids(&self, class: FrameClass) -> Vec<i32> {
        let mut ids: Vec<i32> = self
            .variables
            .iter()
            .filter_map(|(key, value)| {
                let id = key
                    .strip_prefix("FRAME_")?
                    .strip_suffix("_CLASS")?
                    .parse::<i32>()
                    .ok()?;
                let code = value.first_number()? as i32;
                class.matches(code).then_some(id)
            })
            .collect();
        ids.sort_unstable();
        ids
    }

    fn define_frame(&mut self, definition: &FrameDefinition) -> Result<()> {
        let lines = definition.kernel_lines();
        let assignments = parse_assignments(&lines.join("\n"))?;
        self.apply(assignments)?;

        tracing::debug!(
            frame = %definition.name,
            frame_id = definition.id,
            relative = %definition.relative,
            "Defined TK frame"
        );
        Ok(())
    }

    fn undefine_frame(&mut self, keys: &[String]) {
        for key in keys {
            self.variables.remove(&key.to_uppercase());
        }
    }

    fn resolve_frame_name(&self, name: &str) -> Option<i32> {
        let name = name.trim().to_uppercase();
        if let Some(builtin) = Self::builtin_by_name(&name) {
            return Some(builtin.id);
        }
        self.number(&format!("FRAME_{}", name)).map(|id| id as i32)
    }

    fn frame_name(&self, id: i32) -> Option<String> {
        if let Some(builtin) = Self::builtin_by_id(id) {
            return Some(builtin.name.to_string());
        }
        self.text(&format!("FRAME_{}_NAME", id)).map(str::to_string)
    }

    fn state_vector(
        &self,
        target: &str,
        epoch: Epoch,
        frame: &str,
        observer: &str,
        correction: Aberration,
    ) -> Result<StateVector> {
        let target_id = self.require_body(target)?;
        let observer_id = self.require_body(observer)?;

        let state = ephemeris::relative_state(target_id, observer_id, epoch, correction)
            .ok_or_else(|| GateError::InsufficientEphemeris {
                target: target.to_string(),
                observer: observer.to_string(),
            })?;

        let rotation = self.rotation_from_j2000(frame, epoch, 0)?;
        Ok(StateVector {
            position: rotation * state.position,
            velocity: rotation * state.velocity,
            light_time: state.light_time,
        })
    }

    fn frame_transform_matrix(&self, from: &str, to: &str, epoch: Epoch) -> Result<Matrix3<f64>> {
        let from_rotation = self.rotation_from_j2000(from, epoch, 0)?;
        let to_rotation = self.rotation_from_j2000(to, epoch, 0)?;
        Ok(to_rotation * from_rotation.transpose())
    }

    fn propagate_elements(
        &self,
        elements: &sgp4::Elements,
        model: PropagationModel,
        epoch: Epoch,
    ) -> Result<StateVector> {
        let selected = PropagationModel::classify(elements)?;
        if selected != model {
            return Err(GateError::Propagation(format!(
                "element set needs the {:?} model, {:?} was requested",
                selected, model
            )));
        }

        let constants = sgp4::Constants::from_elements(elements)
            .map_err(|e| GateError::Propagation(e.to_string()))?;
        let minutes = (epoch - Epoch::from_naive_utc(elements.datetime)) / 60.0;

        tracing::trace!(?model, minutes, "Propagating element set");
        let prediction = constants
            .propagate(sgp4::MinutesSinceEpoch(minutes))
            .map_err(|e| GateError::Propagation(e.to_string()))?;

        Ok(StateVector {
            position: Vector3::from(prediction.position),
            velocity: Vector3::from(prediction.velocity),
            light_time: 0.0,
        })
    }

    fn body_id(&self, name: &str) -> Option<i32> {
        let name = name.trim().to_uppercase();
        if let Ok(id) = name.parse::<i32>() {
            return Some(id);
        }

        self.pool_body_codes()
            .into_iter()
            .find(|(_, n)| *n == name)
            .map(|(id, _)| id)
            .or_else(|| {
                BUILTIN_BODIES
                    .iter()
                    .find(|(_, n)| *n == name)
                    .map(|(id, _)| *id)
            })
    }

    fn body_name(&self, id: i32) -> Option<String> {
        self.pool_body_codes()
            .into_iter()
            .find(|(code, _)| *code == id)
            .map(|(_, name)| name)
            .or_else(|| {
                BUILTIN_BODIES
                    .iter()
                    .find(|(code, _)| *code == id)
                    .map(|(_, name)| name.to_string())
            })
    }

    fn body_radii(&self, id: i32) -> Option<[f64; 3]> {
        match self.get(&format!("BODY{}_RADII", id)) {
            Some(PoolValue::Numeric(r)) if r.len() == 3 => Some([r[0], r[1], r[2]]),
            _ => BUILTIN_RADII
                .iter()
                .find(|(code, _)| *code == id)
                .map(|(_, radii)| *radii),
        }
    }

    fn known_bodies(&self) -> Vec<(i32, String)> {
        let mut bodies: BTreeMap<i32, String> = BUILTIN_BODIES
            .iter()
            .map(|(id, name)| (*id, name.to_string()))
            .collect();
        // Reversed pool order: apply oldest first so the latest mapping wins
        for (id, name) in self.pool_body_codes().into_iter().rev() {
            bodies.insert(id, name);
        }
        bodies.into_iter().collect()
    }

    fn builtin_frames(&self) -> Vec<FrameInfo> {
        BUILTIN_FRAMES
            .iter()
            .map(|f| FrameInfo {
                id: f.id,
                name: f.name.to_string(),
            })
            .collect()
    }

    fn kernel_frames(&self) -> Vec<FrameInfo> {
        self.used_frame_ids(FrameClass::All)
            .into_iter()
            .filter_map(|id| {
                let name = self.frame_name(id)?;
                Some(FrameInfo { id, name })
            })
            .collect()
    }

    fn star_tables(&self) -> Vec<String> {
        self.star_tables.keys().cloned().collect()
    }

    fn find_stars(&self, table: &str, catalog_number: i64) -> Result<Vec<StarRecord>> {
        let rows = self
            .star_tables
            .get(&table.to_uppercase())
            .ok_or_else(|| GateError::Catalog(format!("no table named '{}'", table)))?;

        Ok(rows
            .iter()
            .filter(|star| star.catalog_number == catalog_number)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toolkit::AngleUnits;

    fn topo_definition(name: &str, id: i32, lon: f64, colat: f64) -> FrameDefinition {
        FrameDefinition {
            name: name.to_string(),
            id,
            center: EARTH,
            relative: "IAU_EARTH".to_string(),
            angles: [-lon, -colat, 180.0],
            axes: [3, 2, 3],
            units: AngleUnits::Degrees,
        }
    }

    #[test]
    fn test_define_and_undefine_frame() {
        let mut pool = KernelPool::new();
        let definition = topo_definition("TEST_TOPO", 1400000, 10.0, 40.0);
        pool.define_frame(&definition).unwrap();

        assert_eq!(pool.resolve_frame_name("test_topo"), Some(1400000));
        assert_eq!(pool.frame_name(1400000).as_deref(), Some("TEST_TOPO"));
        assert_eq!(pool.used_frame_ids(FrameClass::Tk), vec![1400000]);
        assert!(pool.used_frame_ids(FrameClass::Ck).is_empty());

        pool.undefine_frame(&FrameDefinition::pool_keys("TEST_TOPO", 1400000));
        assert_eq!(pool.resolve_frame_name("TEST_TOPO"), None);
        assert_eq!(pool.variable_count(), 0);
    }

    #[test]
    fn test_builtin_frames_resolve() {
        let pool = KernelPool::new();
        assert_eq!(pool.resolve_frame_name("J2000"), Some(1));
        let earth = pool.resolve_body_fixed_frame(EARTH).unwrap();
        assert_eq!(earth.name, "IAU_EARTH");
        assert!(pool.resolve_body_fixed_frame(-82).is_none());
    }

    #[test]
    fn test_object_frame_override() {
        let mut pool = KernelPool::new();
        pool.load_kernel_text("OBJECT_399_FRAME = 'IAU_MOON'").unwrap();
        assert_eq!(pool.resolve_body_fixed_frame(EARTH).unwrap().id, 10020);
    }

    #[test]
    fn test_earth_rotation_pole_and_spin() {
        let pool = KernelPool::new();
        let epoch = Epoch::from_seconds(12345.0);
        let m = pool.frame_transform_matrix("J2000", "IAU_EARTH", epoch).unwrap();

        // The pole barely moves, and the matrix is a proper rotation
        let pole = m * Vector3::z();
        assert!((pole.z - 1.0).abs() < 1e-6);
        assert!(((m * m.transpose()) - Matrix3::identity()).norm() < 1e-12);

        // One sidereal day later the frame is back where it started
        let later = pool
            .frame_transform_matrix("J2000", "IAU_EARTH", epoch + 86164.0905)
            .unwrap();
        assert!((later - m).norm() < 1e-4);
    }

    #[test]
    fn test_topo_frame_up_axis() {
        let mut pool = KernelPool::new();
        pool.define_frame(&topo_definition("UP_TOPO", 1400001, 30.0, 50.0)).unwrap();

        let m = pool.frame_transform_matrix("IAU_EARTH", "UP_TOPO", Epoch::J2000).unwrap();
        let (lon, colat) = (30.0_f64.to_radians(), 50.0_f64.to_radians());
        let zenith = Vector3::new(colat.sin() * lon.cos(), colat.sin() * lon.sin(), colat.cos());

        let local = m * zenith;
        assert!((local - Vector3::z()).norm() < 1e-9);
    }

    #[test]
    fn test_unknown_frame() {
        let pool = KernelPool::new();
        assert!(matches!(
            pool.frame_transform_matrix("J2000", "NOPE", Epoch::J2000),
            Err(GateError::UnknownFrame(_))
        ));
    }

    #[test]
    fn test_body_names_and_radii() {
        let mut pool = KernelPool::new();
        assert_eq!(pool.body_id("earth"), Some(399));
        assert_eq!(pool.body_id("-82"), Some(-82));
        assert_eq!(pool.body_name(301).as_deref(), Some("MOON"));

        pool.load_kernel_text(
            "NAIF_BODY_NAME += 'MY_CRAFT'\nNAIF_BODY_CODE += -900\nBODY399_RADII = (6378.0 6378.0 6357.0)",
        )
        .unwrap();
        assert_eq!(pool.body_id("my_craft"), Some(-900));
        assert_eq!(pool.body_name(-900).as_deref(), Some("MY_CRAFT"));
        assert_eq!(pool.body_radii(399), Some([6378.0, 6378.0, 6357.0]));
        assert!(pool.known_bodies().iter().any(|(id, _)| *id == -900));
    }

    #[test]
    fn test_state_vector_in_body_frame() {
        let pool = KernelPool::new();
        let epoch = Epoch::from_seconds(3.0e8);
        let inertial = pool
            .state_vector("SUN", epoch, "J2000", "EARTH", Aberration::None)
            .unwrap();
        let fixed = pool
            .state_vector("SUN", epoch, "IAU_EARTH", "EARTH", Aberration::None)
            .unwrap();
        assert!((inertial.position.norm() - fixed.position.norm()).abs() < 1e-3);

        assert!(matches!(
            pool.state_vector("MARS", epoch, "J2000", "EARTH", Aberration::None),
            Err(GateError::InsufficientEphemeris { .. })
        ));
        assert!(matches!(
            pool.state_vector("VULCAN", epoch, "J2000", "EARTH", Aberration::None),
            Err(GateError::UnknownBody(_))
        ));
    }

    #[test]
    fn test_star_table_lookup() {
        let mut pool = KernelPool::new();
        let csv = "CATALOG_NUMBER,DEC,DEC_EPOCH,DEC_PM,PARLAX,RA,RA_EPOCH,RA_PM\n\
                   7,1.0,50.0,0.0,0.0001,2.0,50.0,0.0\n";
        pool.insert_star_table("hipparcos", crate::stars::parse_star_csv(csv).unwrap());

        assert_eq!(pool.star_tables(), vec!["HIPPARCOS".to_string()]);
        assert_eq!(pool.find_stars("HIPPARCOS", 7).unwrap().len(), 1);
        assert!(pool.find_stars("HIPPARCOS", 8).unwrap().is_empty());
        assert!(pool.find_stars("TYCHO", 7).is_err());
    }

    #[test]
    fn test_propagation_model_must_match_elements() {
        use crate::records::tests::{BOUNDARY_LINE2, GEO, ISS};

        let pool = KernelPool::new();
        let iss = sgp4::Elements::from_tle(None, ISS[0].as_bytes(), ISS[1].as_bytes()).unwrap();
        let epoch = Epoch::from_naive_utc(iss.datetime) + 3600.0;

        let state = pool.propagate_elements(&iss, PropagationModel::NearEarth, epoch).unwrap();
        assert!((state.position.norm() - 6790.0).abs() < 50.0);
        assert!(matches!(
            pool.propagate_elements(&iss, PropagationModel::DeepSpace, epoch),
            Err(GateError::Propagation(_))
        ));

        let boundary = sgp4::Elements::from_tle(None, GEO[0].as_bytes(), BOUNDARY_LINE2.as_bytes()).unwrap();
        let epoch = Epoch::from_naive_utc(boundary.datetime) + 60.0;
        assert!(pool.propagate_elements(&boundary, PropagationModel::DeepSpace, epoch).is_ok());
        assert!(matches!(
            pool.propagate_elements(&boundary, PropagationModel::NearEarth, epoch),
            Err(GateError::Propagation(_))
        ));
    }
}

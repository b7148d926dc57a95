///! Topocentric frame lifecycle
///!
///! A topocentric frame is a TK frame defined as a fixed Euler-angle offset
///! from a body-fixed frame: +X towards true north, +Y west, +Z along the
///! local outward normal. The definition is angle-only, so the observer's
///! distance from the body center is carried on the handle and subtracted
///! from vectors by `adjust`.

mod allocator;

pub use allocator::{FRAME_ID_BEGIN, FRAME_ID_END, find_free_id};

use crate::error::{GateError, Result};
use crate::toolkit::{AngleUnits, FrameDefinition, Toolkit, Unit};
use nalgebra::Vector3;

/// Longest frame name accepted, leaving room for the pool variable prefix
pub const MAX_FRAME_NAME_LEN: usize = 26;

const TOPO_AXES: [u8; 3] = [3, 2, 3];
const TOPO_ROLL_DEG: f64 = 180.0;

/// Handle to a loaded topocentric frame
#[derive(Debug, Clone, PartialEq)]
pub struct TopoFrame {
    pub name: String,
    pub id: i32,
    pub body_id: i32,
    pub latitude: f64,
    pub longitude: f64,
    /// Distance of the observer from the body center, km
    pub radius: f64,
}

/// Euler angles placing the frame at `latitude`/`longitude` (degrees)
pub fn topo_angles(latitude: f64, longitude: f64) -> [f64; 3] {
    let longitude = if longitude < 0.0 {
        longitude + 360.0
    } else {
        longitude
    };
    let colatitude = 90.0 - latitude;

    [-longitude, -colatitude, TOPO_ROLL_DEG]
}

impl TopoFrame {
    /// Define a topocentric frame named `name` in the toolkit.
    ///
    /// Fails without touching the toolkit when the name is too long or
    /// already resolvable, when the body has no body-fixed frame, or when no
    /// frame id is left.
    pub fn load<T: Toolkit + ?Sized>(
        toolkit: &mut T,
        name: &str,
        body_id: i32,
        latitude: f64,
        longitude: f64,
        radius: f64,
    ) -> Result<Self> {
        if name.len() > MAX_FRAME_NAME_LEN {
            return Err(GateError::FrameNameTooLong {
                name: name.to_string(),
                max: MAX_FRAME_NAME_LEN,
            });
        }

        if toolkit.resolve_frame_name(name).is_some() {
            return Err(GateError::DuplicateFrameName(name.to_string()));
        }

        let body_fixed = toolkit
            .resolve_body_fixed_frame(body_id)
            .ok_or(GateError::BodyFrameUnresolvable(body_id))?;

        let id = find_free_id(toolkit)?;

        let definition = FrameDefinition {
            name: name.to_string(),
            id,
            center: body_id,
            relative: body_fixed.name.clone(),
            angles: topo_angles(latitude, longitude),
            axes: TOPO_AXES,
            units: AngleUnits::Degrees,
        };
        toolkit.define_frame(&definition)?;

        tracing::debug!(
            frame = %name,
            frame_id = id,
            body_id,
            relative = %body_fixed.name,
            latitude,
            longitude,
            "Loaded topocentric frame"
        );

        Ok(TopoFrame {
            name: name.to_string(),
            id,
            body_id,
            latitude,
            longitude,
            radius,
        })
    }

    /// Remove every pool variable written by `load`
    pub fn unload<T: Toolkit + ?Sized>(self, toolkit: &mut T) -> Result<()> {
        let id = toolkit
            .resolve_frame_name(&self.name)
            .ok_or_else(|| GateError::FrameNotResolvable(self.name.clone()))?;

        toolkit.undefine_frame(&FrameDefinition::pool_keys(&self.name, id));

        tracing::debug!(frame = %self.name, frame_id = id, "Unloaded topocentric frame");
        Ok(())
    }

    /// Move a km vector from the body center to the observer
    pub fn adjust(&self, rec: &mut Vector3<f64>) {
        rec.z -= self.radius;
    }

    /// Like `adjust` for a vector expressed in `units`
    pub fn adjust_in<T: Toolkit + ?Sized>(&self, toolkit: &T, rec: &mut Vector3<f64>, units: Unit) -> Result<()> {
        if units == Unit::Km {
            self.adjust(rec);
        } else {
            rec.z -= toolkit.convert_units(self.radius, Unit::Km, units)?;
        }
        Ok(())
    }
}

/// Everything needed to load an observer's frame
#[derive(Debug, Clone, PartialEq)]
pub struct ObserverSite {
    pub frame_name: String,
    pub body_id: i32,
    pub latitude: f64,
    pub longitude: f64,
    pub radius: f64,
}

impl ObserverSite {
    pub fn load<T: Toolkit + ?Sized>(&self, toolkit: &mut T) -> Result<TopoFrame> {
        TopoFrame::load(
            toolkit,
            &self.frame_name,
            self.body_id,
            self.latitude,
            self.longitude,
            self.radius,
        )
    }
}

/// Distance from the body center of a point `height_km` above the reference
/// ellipsoid at geodetic `latitude`/`longitude`. Zero when the toolkit has no
/// radii for the body.
pub fn observer_radius<T: Toolkit + ?Sized>(
    toolkit: &T,
    body_id: i32,
    latitude: f64,
    longitude: f64,
    height_km: f64,
) -> f64 {
    let Some([equatorial, _, polar]) = toolkit.body_radii(body_id) else {
        return 0.0;
    };

    let flattening = (equatorial - polar) / equatorial;
    let e2 = flattening * (2.0 - flattening);
    let (lat, lon) = (latitude.to_radians(), longitude.to_radians());
    let n = equatorial / (1.0 - e2 * lat.sin().powi(2)).sqrt();

    let surface = Vector3::new(
        n * lat.cos() * lon.cos(),
        n * lat.cos() * lon.sin(),
        n * (1.0 - e2) * lat.sin(),
    );

    surface.norm() + height_km
}

///! Position to azimuth/elevation pipeline
///!
///! Every target kind ends as a rectangular vector in a topocentric frame.
///! Stars, satellites and custom objects are built in J2000, rotated into the
///! frame and moved from the body center to the observer; bodies come
///! straight from the toolkit already in the frame. The vector is then
///! reduced to range, compass azimuth and elevation.

use crate::error::Result;
use crate::records::{CustomObject, SatelliteRecord};
use crate::stars::StarRecord;
use crate::time::Epoch;
use crate::toolkit::{Aberration, Toolkit, Unit, radec_to_rectangular};
use crate::topo::TopoFrame;
use nalgebra::Vector3;

const INERTIAL_FRAME: &str = "J2000";

/// Correction used for catalog body states
pub const BODY_CORRECTION: Aberration = Aberration::CnS;

/// Which outputs a caller wants filled in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AzElSelection {
    pub range: bool,
    pub azimuth: bool,
    pub elevation: bool,
}

impl AzElSelection {
    pub const ALL: AzElSelection = AzElSelection {
        range: true,
        azimuth: true,
        elevation: true,
    };

    pub const ANGLES: AzElSelection = AzElSelection {
        range: false,
        azimuth: true,
        elevation: true,
    };
}

impl Default for AzElSelection {
    fn default() -> Self {
        Self::ALL
    }
}

/// Range in vector units, azimuth and elevation in degrees
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Observation {
    pub range: Option<f64>,
    pub azimuth: Option<f64>,
    pub elevation: Option<f64>,
}

/// Counter-clockwise angle (radians) to clockwise-from-north degrees
pub fn compass_azimuth(raw: f64) -> f64 {
    360.0 - raw.to_degrees()
}

/// Reduce a topocentric vector to the selected outputs
pub fn to_observation<T: Toolkit + ?Sized>(toolkit: &T, rec: &Vector3<f64>, select: AzElSelection) -> Observation {
    let raw = toolkit.rectangular_to_range_az_el(rec);

    Observation {
        range: select.range.then_some(raw.range),
        azimuth: select.azimuth.then(|| compass_azimuth(raw.azimuth)),
        elevation: select.elevation.then(|| raw.elevation.to_degrees()),
    }
}

/// Rotate a J2000 vector given in `units` into the frame and shift it to the observer
fn inertial_to_topocentric<T: Toolkit + ?Sized>(
    toolkit: &T,
    frame: &TopoFrame,
    inertial: Vector3<f64>,
    units: Unit,
    epoch: Epoch,
) -> Result<Vector3<f64>> {
    let rotation = toolkit.frame_transform_matrix(INERTIAL_FRAME, &frame.name, epoch)?;
    let mut rec = rotation * inertial;
    frame.adjust_in(toolkit, &mut rec, units)?;
    Ok(rec)
}

pub fn star_vector<T: Toolkit + ?Sized>(
    toolkit: &T,
    frame: &TopoFrame,
    star: &StarRecord,
    epoch: Epoch,
) -> Result<Vector3<f64>> {
    let distance = star.distance_km(toolkit)?;
    let position = star.project_at(epoch);
    let inertial = radec_to_rectangular(distance, position.ra.to_radians(), position.dec.to_radians());
    inertial_to_topocentric(toolkit, frame, inertial, Unit::Km, epoch)
}

pub fn satellite_vector<T: Toolkit + ?Sized>(
    toolkit: &T,
    frame: &TopoFrame,
    satellite: &SatelliteRecord,
    epoch: Epoch,
) -> Result<Vector3<f64>> {
    let state = toolkit.propagate_elements(&satellite.elements, satellite.model(), epoch)?;
    inertial_to_topocentric(toolkit, frame, state.position, Unit::Km, epoch)
}

pub fn custom_vector<T: Toolkit + ?Sized>(
    toolkit: &T,
    frame: &TopoFrame,
    object: &CustomObject,
    epoch: Epoch,
) -> Result<Vector3<f64>> {
    let (ra, dec) = object.position_at(epoch);
    let inertial = radec_to_rectangular(object.range, ra.to_radians(), dec.to_radians());
    inertial_to_topocentric(toolkit, frame, inertial, object.units, epoch)
}

/// Body state in the frame; no radial correction is applied
pub fn body_vector<T: Toolkit + ?Sized>(
    toolkit: &T,
    frame: &TopoFrame,
    target: &str,
    observer: &str,
    epoch: Epoch,
) -> Result<Vector3<f64>> {
    let state = toolkit.state_vector(target, epoch, &frame.name, observer, BODY_CORRECTION)?;
    Ok(state.position)
}

/// Anything the pipeline can point at
#[derive(Debug, Clone, Copy)]
pub enum Target<'a> {
    Stars(&'a [StarRecord]),
    Body { target: &'a str, observer: &'a str },
    Satellite(&'a SatelliteRecord),
    Custom(&'a CustomObject),
}

impl Target<'_> {
    /// One observation per target row; only star lookups produce several
    pub fn observe<T: Toolkit + ?Sized>(
        &self,
        toolkit: &T,
        frame: &TopoFrame,
        epoch: Epoch,
        select: AzElSelection,
    ) -> Result<Vec<Observation>> {
        let vectors = match self {
            Target::Stars(stars) => stars
                .iter()
                .map(|star| star_vector(toolkit, frame, star, epoch))
                .collect::<Result<Vec<_>>>()?,
            Target::Body { target, observer } => {
                vec![body_vector(toolkit, frame, target, observer, epoch)?]
            }
            Target::Satellite(satellite) => vec![satellite_vector(toolkit, frame, satellite, epoch)?],
            Target::Custom(object) => vec![custom_vector(toolkit, frame, object, epoch)?],
        };

        Ok(vectors
            .iter()
            .map(|rec| to_observation(toolkit, rec, select))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::tests::ISS;
    use crate::time::JULIAN_YEAR;
    use crate::toolkit::{KernelPool, rectangular_to_radec};
    use crate::topo::observer_radius;

    const LAT: f64 = 40.0;
    const LON: f64 = -75.0;

    fn observer(pool: &mut KernelPool, radius: f64) -> TopoFrame {
        TopoFrame::load(pool, "TEST_AZEL_TOPO", 399, LAT, LON, radius).unwrap()
    }

    /// Custom object placed along a topocentric axis at `epoch`
    fn object_along(pool: &KernelPool, frame: &TopoFrame, axis: Vector3<f64>, epoch: Epoch) -> CustomObject {
        let to_j2000 = pool.frame_transform_matrix(&frame.name, "J2000", epoch).unwrap();
        let radec = rectangular_to_radec(&(to_j2000 * axis));
        CustomObject {
            range: 1.0e12,
            units: Unit::Km,
            ra: radec.azimuth.to_degrees(),
            dec: radec.elevation.to_degrees(),
            ra_pm: 0.0,
            dec_pm: 0.0,
        }
    }

    #[test]
    fn test_compass_azimuth() {
        assert!((compass_azimuth(90f64.to_radians()) - 270.0).abs() < 1e-12);
        assert_eq!(compass_azimuth(0.0), 360.0);
    }

    #[test]
    fn test_selection_leaves_outputs_empty() {
        let pool = KernelPool::new();
        let only_el = AzElSelection {
            range: false,
            azimuth: false,
            elevation: true,
        };
        let obs = to_observation(&pool, &Vector3::new(1.0, 0.0, 1.0), only_el);
        assert_eq!(obs.range, None);
        assert_eq!(obs.azimuth, None);
        assert!((obs.elevation.unwrap() - 45.0).abs() < 1e-12);
    }

    #[test]
    fn test_custom_object_on_local_axes() {
        let mut pool = KernelPool::new();
        let frame = observer(&mut pool, 0.0);
        let epoch = Epoch::from_seconds(7.5e8);

        let zenith = object_along(&pool, &frame, Vector3::z(), epoch);
        let obs = Target::Custom(&zenith).observe(&pool, &frame, epoch, AzElSelection::ALL).unwrap()[0];
        assert!((obs.elevation.unwrap() - 90.0).abs() < 1e-6);

        // West is +Y: raw angle 90 deg, compass 270
        let west = object_along(&pool, &frame, Vector3::y(), epoch);
        let obs = Target::Custom(&west).observe(&pool, &frame, epoch, AzElSelection::ANGLES).unwrap()[0];
        assert!((obs.azimuth.unwrap() - 270.0).abs() < 1e-6);
        assert!(obs.elevation.unwrap().abs() < 1e-6);
        assert_eq!(obs.range, None);

        frame.unload(&mut pool).unwrap();
    }

    #[test]
    fn test_custom_range_units_follow_the_record() {
        let mut pool = KernelPool::new();
        let radius = observer_radius(&pool, 399, LAT, LON, 0.0);
        let frame = observer(&mut pool, radius);
        let epoch = Epoch::from_seconds(7.5e8);

        // One AU overhead stays overhead once the radius is taken off in AU
        let mut zenith = object_along(&pool, &frame, Vector3::z(), epoch);
        zenith.range = 1.0;
        zenith.units = Unit::Au;
        let obs = Target::Custom(&zenith).observe(&pool, &frame, epoch, AzElSelection::ALL).unwrap()[0];
        assert!((obs.elevation.unwrap() - 90.0).abs() < 1e-6);
        assert!((obs.range.unwrap() - (1.0 - radius / 149_597_870.7)).abs() < 1e-9);

        // The same point given in meters and in km lands in the same place
        let mut meters = zenith;
        meters.range = 7.0e6;
        meters.units = Unit::M;
        let mut km = zenith;
        km.range = 7.0e3;
        km.units = Unit::Km;
        let in_m = Target::Custom(&meters).observe(&pool, &frame, epoch, AzElSelection::ALL).unwrap()[0];
        let in_km = Target::Custom(&km).observe(&pool, &frame, epoch, AzElSelection::ALL).unwrap()[0];
        assert!((in_m.range.unwrap() / 1000.0 - in_km.range.unwrap()).abs() < 1e-6);
        assert!((in_m.range.unwrap() - (7.0e6 - radius * 1000.0)).abs() < 1e-3);

        frame.unload(&mut pool).unwrap();
    }

    #[test]
    fn test_star_at_zenith_with_proper_motion() {
        let mut pool = KernelPool::new();
        let frame = observer(&mut pool, 6371.0);
        let epoch = Epoch::from_seconds(10.0 * JULIAN_YEAR);

        let target = object_along(&pool, &frame, Vector3::z(), epoch);
        // Catalog position at 1990 drifting 0.5 deg/yr in RA reaches the zenith in 2010
        let star = StarRecord {
            catalog_number: 1,
            dec: target.dec,
            dec_epoch: 40.0,
            dec_pm: 0.0,
            dec_pm_sigma: 0.0,
            dec_sigma: 0.0,
            dm_number: 0,
            parallax: 1.0 / 3600.0,
            ra: target.ra - 10.0,
            ra_epoch: 40.0,
            ra_pm: 0.5,
            ra_pm_sigma: 0.0,
            ra_sigma: 0.0,
            spectral_type: "G2V".to_string(),
            visual_magnitude: 0.0,
        };

        let stars = [star.clone(), star];
        let observations = Target::Stars(&stars)
            .observe(&pool, &frame, epoch, AzElSelection::ALL)
            .unwrap();
        assert_eq!(observations.len(), 2);
        assert!((observations[0].elevation.unwrap() - 90.0).abs() < 1e-6);

        // One parsec, less the observer radius along the line of sight
        let parsec_km = 3.085_677_581_491_367e13;
        assert!((observations[0].range.unwrap() - (parsec_km - 6371.0)).abs() < 1.0);
    }

    #[test]
    fn test_sun_above_subsolar_point() {
        let mut pool = KernelPool::new();
        let epoch = Epoch::from_seconds(2.5e8);

        let sun = pool
            .state_vector("SUN", epoch, "IAU_EARTH", "EARTH", Aberration::None)
            .unwrap();
        let subsolar = rectangular_to_radec(&sun.position);
        let frame = TopoFrame::load(
            &mut pool,
            "SUBSOLAR_TOPO",
            399,
            subsolar.elevation.to_degrees(),
            subsolar.azimuth.to_degrees(),
            0.0,
        )
        .unwrap();

        let target = Target::Body {
            target: "SUN",
            observer: "EARTH",
        };
        let obs = target.observe(&pool, &frame, epoch, AzElSelection::ALL).unwrap()[0];
        assert!(obs.elevation.unwrap() > 89.9, "elevation {:?}", obs.elevation);
        frame.unload(&mut pool).unwrap();
    }

    #[test]
    fn test_satellite_observation_is_bounded() {
        let mut pool = KernelPool::new();
        let radius = observer_radius(&pool, 399, LAT, LON, 0.0);
        let frame = observer(&mut pool, radius);
        let record = SatelliteRecord::from_tle(ISS[0], ISS[1]).unwrap();

        for minute in 0..5 {
            let epoch = record.epoch + minute as f64 * 600.0;
            let obs = Target::Satellite(&record)
                .observe(&pool, &frame, epoch, AzElSelection::ALL)
                .unwrap()[0];
            let range = obs.range.unwrap();
            assert!(range > 300.0 && range < 14_000.0, "range {}", range);
            assert!((-90.0..=90.0).contains(&obs.elevation.unwrap()));
            assert!((0.0..=360.0).contains(&obs.azimuth.unwrap()));
        }
    }
}

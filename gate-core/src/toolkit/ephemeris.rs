///! Low precision geocentric ephemerides
///!
///! Sun and Moon positions from the Astronomical Almanac short series,
///! good to roughly 0.01 deg for the Sun and 0.3 deg for the Moon. Vectors
///! are equatorial J2000 in km; precession since J2000 is ignored.

use super::{Aberration, SPEED_OF_LIGHT_KM_S, StateVector};
use crate::time::Epoch;
use nalgebra::Vector3;

pub const SSB: i32 = 0;
pub const EARTH_BARYCENTER: i32 = 3;
pub const SUN: i32 = 10;
pub const MOON: i32 = 301;
pub const EARTH: i32 = 399;

const KM_PER_AU: f64 = 149_597_870.7;
const EARTH_RADIUS_KM: f64 = 6378.14;
const OBLIQUITY_J2000_DEG: f64 = 23.439_291;
const EARTH_MOON_MASS_RATIO: f64 = 81.300_57;

/// Half-width of the central difference used for velocities, seconds
const VELOCITY_STEP: f64 = 30.0;

const CONVERGED_ITERATIONS: usize = 5;

fn sin_deg(x: f64) -> f64 {
    x.to_radians().sin()
}

fn cos_deg(x: f64) -> f64 {
    x.to_radians().cos()
}

fn sun_geocentric(epoch: Epoch) -> Vector3<f64> {
    let n = epoch.days_since_j2000();
    let l = 280.460 + 0.985_647_4 * n;
    let g = 357.528 + 0.985_600_3 * n;
    let lambda = l + 1.915 * sin_deg(g) + 0.020 * sin_deg(2.0 * g);
    let eps = 23.439 - 0.000_000_4 * n;
    let r = (1.000_14 - 0.016_71 * cos_deg(g) - 0.000_14 * cos_deg(2.0 * g)) * KM_PER_AU;

    Vector3::new(
        r * cos_deg(lambda),
        r * cos_deg(eps) * sin_deg(lambda),
        r * sin_deg(eps) * sin_deg(lambda),
    )
}

fn moon_geocentric(epoch: Epoch) -> Vector3<f64> {
    let t = epoch.centuries_since_j2000();

    let lambda = 218.32 + 481_267.881 * t
        + 6.29 * sin_deg(135.0 + 477_198.87 * t)
        - 1.27 * sin_deg(259.3 - 413_335.36 * t)
        + 0.66 * sin_deg(235.7 + 890_534.22 * t)
        + 0.21 * sin_deg(269.9 + 954_397.74 * t)
        - 0.19 * sin_deg(357.5 + 35_999.05 * t)
        - 0.11 * sin_deg(186.5 + 966_404.03 * t);

    let beta = 5.13 * sin_deg(93.3 + 483_202.02 * t)
        + 0.28 * sin_deg(228.2 + 960_400.89 * t)
        - 0.28 * sin_deg(318.3 + 6_003.15 * t)
        - 0.17 * sin_deg(217.6 - 407_332.21 * t);

    let parallax = 0.9508
        + 0.0518 * cos_deg(135.0 + 477_198.87 * t)
        + 0.0095 * cos_deg(259.3 - 413_335.36 * t)
        + 0.0078 * cos_deg(235.7 + 890_534.22 * t)
        + 0.0028 * cos_deg(269.9 + 954_397.74 * t);

    let r = EARTH_RADIUS_KM / sin_deg(parallax);
    let ecliptic = Vector3::new(
        r * cos_deg(beta) * cos_deg(lambda),
        r * cos_deg(beta) * sin_deg(lambda),
        r * sin_deg(beta),
    );

    let (s, c) = OBLIQUITY_J2000_DEG.to_radians().sin_cos();
    Vector3::new(
        ecliptic.x,
        c * ecliptic.y - s * ecliptic.z,
        s * ecliptic.y + c * ecliptic.z,
    )
}

/// Geocentric J2000 position of a supported body
pub fn geocentric_position(body: i32, epoch: Epoch) -> Option<Vector3<f64>> {
    match body {
        EARTH => Some(Vector3::zeros()),
        MOON => Some(moon_geocentric(epoch)),
        SUN | SSB => Some(sun_geocentric(epoch)),
        EARTH_BARYCENTER => Some(moon_geocentric(epoch) / (1.0 + EARTH_MOON_MASS_RATIO)),
        _ => None,
    }
}

fn geocentric_velocity(body: i32, epoch: Epoch) -> Option<Vector3<f64>> {
    let ahead = geocentric_position(body, epoch + VELOCITY_STEP)?;
    let behind = geocentric_position(body, epoch + -VELOCITY_STEP)?;
    Some((ahead - behind) / (2.0 * VELOCITY_STEP))
}

/// State of `target` relative to `observer` in J2000, or `None` when either
/// body has no ephemeris
pub fn relative_state(
    target: i32,
    observer: i32,
    epoch: Epoch,
    correction: Aberration,
) -> Option<StateVector> {
    let observer_pos = geocentric_position(observer, epoch)?;
    let observer_vel = geocentric_velocity(observer, epoch)?;

    let mut position = geocentric_position(target, epoch)? - observer_pos;
    let mut light_time = position.norm() / SPEED_OF_LIGHT_KM_S;

    if correction.light_time() {
        let iterations = if correction.converged() {
            CONVERGED_ITERATIONS
        } else {
            1
        };
        for _ in 0..iterations {
            position = geocentric_position(target, epoch + -light_time)? - observer_pos;
            let next = position.norm() / SPEED_OF_LIGHT_KM_S;
            let settled = (next - light_time).abs() < 1e-9;
            light_time = next;
            if settled {
                break;
            }
        }
    }

    let target_vel = geocentric_velocity(target, epoch + -light_time)?;

    if correction.stellar() {
        // First order stellar aberration from the observer's barycentric velocity
        let observer_ssb_vel = observer_vel - geocentric_velocity(SUN, epoch)?;
        position += observer_ssb_vel * (position.norm() / SPEED_OF_LIGHT_KM_S);
    }

    Some(StateVector {
        position,
        velocity: target_vel - observer_vel,
        light_time,
    })
}

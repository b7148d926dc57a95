use crate::error::{GateError, Result};
use std::fmt;
use std::str::FromStr;

const KM_PER_AU: f64 = 149_597_870.7;
const KM_PER_LIGHTYEAR: f64 = 9_460_730_472_580.8;
const ARCSEC_PER_RADIAN: f64 = 206_264.806_247_096_36;
/// One parsec is the distance at which one AU subtends one arcsecond
const KM_PER_PARSEC: f64 = KM_PER_AU * ARCSEC_PER_RADIAN;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Km,
    M,
    Au,
    Parsecs,
    Lightyears,
    Radians,
    Degrees,
    Arcminutes,
    Arcseconds,
}

#[derive(PartialEq)]
enum Kind {
    Length,
    Angle,
}

impl Unit {
    fn kind(&self) -> Kind {
        match self {
            Unit::Km | Unit::M | Unit::Au | Unit::Parsecs | Unit::Lightyears => Kind::Length,
            _ => Kind::Angle,
        }
    }

    /// Size of one unit in km (lengths) or radians (angles)
    fn scale(&self) -> f64 {
        match self {
            Unit::Km => 1.0,
            Unit::M => 1e-3,
            Unit::Au => KM_PER_AU,
            Unit::Parsecs => KM_PER_PARSEC,
            Unit::Lightyears => KM_PER_LIGHTYEAR,
            Unit::Radians => 1.0,
            Unit::Degrees => std::f64::consts::PI / 180.0,
            Unit::Arcminutes => std::f64::consts::PI / (180.0 * 60.0),
            Unit::Arcseconds => 1.0 / ARCSEC_PER_RADIAN,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Km => "KM",
            Unit::M => "M",
            Unit::Au => "AU",
            Unit::Parsecs => "PARSECS",
            Unit::Lightyears => "LIGHTYEARS",
            Unit::Radians => "RADIANS",
            Unit::Degrees => "DEGREES",
            Unit::Arcminutes => "ARCMINUTES",
            Unit::Arcseconds => "ARCSECONDS",
        }
    }
}

impl FromStr for Unit {
    type Err = GateError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "KM" | "KILOMETERS" => Ok(Unit::Km),
            "M" | "METERS" => Ok(Unit::M),
            "AU" => Ok(Unit::Au),
            "PARSECS" | "PC" => Ok(Unit::Parsecs),
            "LIGHTYEARS" | "LY" => Ok(Unit::Lightyears),
            "RADIANS" => Ok(Unit::Radians),
            "DEGREES" => Ok(Unit::Degrees),
            "ARCMINUTES" => Ok(Unit::Arcminutes),
            "ARCSECONDS" => Ok(Unit::Arcseconds),
            other => Err(GateError::UnitMismatch {
                from: other.to_string(),
                to: "a known unit".to_string(),
            }),
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub(crate) fn convert(value: f64, from: Unit, to: Unit) -> Result<f64> {
    if from.kind() != to.kind() {
        return Err(GateError::UnitMismatch {
            from: from.to_string(),
            to: to.to_string(),
        });
    }

    Ok(value * from.scale() / to.scale())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_angle_conversion() {
        let arcsec = convert(1.0, Unit::Degrees, Unit::Arcseconds).unwrap();
        assert!((arcsec - 3600.0).abs() < 1e-9);
        let deg = convert(std::f64::consts::PI, Unit::Radians, Unit::Degrees).unwrap();
        assert!((deg - 180.0).abs() < 1e-12);
    }

    #[test]
    fn test_parsec_to_km() {
        let km = convert(1.0, Unit::Parsecs, Unit::Km).unwrap();
        assert!((km / 3.085_677_581e13 - 1.0).abs() < 1e-9);
        assert!((convert(1500.0, Unit::M, Unit::Km).unwrap() - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_cross_kind_rejected() {
        assert!(matches!(
            convert(1.0, Unit::Km, Unit::Degrees),
            Err(GateError::UnitMismatch { .. })
        ));
        assert_eq!("parsecs".parse::<Unit>().unwrap(), Unit::Parsecs);
        assert!("furlongs".parse::<Unit>().is_err());
    }
}

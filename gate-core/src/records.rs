///! Satellite and custom point-source records kept between commands

use crate::error::{GateError, Result};
use crate::stars::project_angle;
use crate::time::{Epoch, JULIAN_YEAR};
use crate::toolkit::{PropagationModel, Unit};

#[derive(Debug, Clone)]
pub struct SatelliteRecord {
    pub lines: [String; 2],
    pub epoch: Epoch,
    pub elements: sgp4::Elements,
    pub deep_space: bool,
}

impl SatelliteRecord {
    pub fn from_tle(line1: &str, line2: &str) -> Result<Self> {
        let (line1, line2) = (line1.trim_end(), line2.trim_end());

        let elements = sgp4::Elements::from_tle(None, line1.as_bytes(), line2.as_bytes())
            .map_err(|e| GateError::InvalidElementSet(e.to_string()))?;
        let epoch = Epoch::from_naive_utc(elements.datetime);
        let model = PropagationModel::classify(&elements)?;

        Ok(SatelliteRecord {
            lines: [line1.to_string(), line2.to_string()],
            epoch,
            elements,
            deep_space: model == PropagationModel::DeepSpace,
        })
    }

    pub fn model(&self) -> PropagationModel {
        if self.deep_space {
            PropagationModel::DeepSpace
        } else {
            PropagationModel::NearEarth
        }
    }

    pub fn describe(&self, id: &str) -> String {
        format!(
            "ID: {}\nEpoch: {:.6} seconds\nDeep space: {}\n\nTLE:\n{}\n{}",
            id,
            self.epoch.seconds(),
            if self.deep_space { "yes" } else { "no" },
            self.lines[0],
            self.lines[1]
        )
    }
}

/// User-defined point source with optional proper motion from J2000
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CustomObject {
    /// Distance from the center of the observer's body, in `units`
    pub range: f64,
    pub units: Unit,
    pub ra: f64,
    pub dec: f64,
    /// Degrees per Julian year
    pub ra_pm: f64,
    pub dec_pm: f64,
}

impl CustomObject {
    /// Right ascension and declination (degrees) at `epoch`
    pub fn position_at(&self, epoch: Epoch) -> (f64, f64) {
        let years = epoch.seconds() / JULIAN_YEAR;
        let (ra, _) = project_angle(self.ra, 0.0, self.ra_pm, 0.0, years);
        let (dec, _) = project_angle(self.dec, 0.0, self.dec_pm, 0.0, years);
        (ra, dec)
    }

    pub fn describe(&self, id: &str) -> String {
        format!(
            "ID: {}\n\
             Range: {:.6} {}\n\
             Right ascension: {:.6} deg\n\
             Declination: {:.6} deg\n\
             Right ascension proper motion: {:.6} deg/yr\n\
             Declination proper motion: {:.6} deg/yr",
            id, self.range, self.units, self.ra, self.dec, self.ra_pm, self.dec_pm
        )
    }
}

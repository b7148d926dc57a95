///! Star catalog rows and proper-motion projection
///!
///! Catalog angles are degrees, proper motions degrees per Julian year and
///! the per-axis epochs Julian years since 1950.

use crate::error::{GateError, Result};
use crate::time::Epoch;
use crate::toolkit::{Toolkit, Unit};
use serde::Deserialize;
use std::path::Path;

/// Stand-in distance for rows without a usable parallax
const NOMINAL_DISTANCE_PARSECS: f64 = 1.0e6;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StarRecord {
    #[serde(rename = "CATALOG_NUMBER")]
    pub catalog_number: i64,
    #[serde(rename = "DEC")]
    pub dec: f64,
    #[serde(rename = "DEC_EPOCH")]
    pub dec_epoch: f64,
    #[serde(rename = "DEC_PM")]
    pub dec_pm: f64,
    #[serde(rename = "DEC_PM_SIGMA", default)]
    pub dec_pm_sigma: f64,
    #[serde(rename = "DEC_SIGMA", default)]
    pub dec_sigma: f64,
    #[serde(rename = "DM_NUMBER", default)]
    pub dm_number: i64,
    #[serde(rename = "PARLAX")]
    pub parallax: f64,
    #[serde(rename = "RA")]
    pub ra: f64,
    #[serde(rename = "RA_EPOCH")]
    pub ra_epoch: f64,
    #[serde(rename = "RA_PM")]
    pub ra_pm: f64,
    #[serde(rename = "RA_PM_SIGMA", default)]
    pub ra_pm_sigma: f64,
    #[serde(rename = "RA_SIGMA", default)]
    pub ra_sigma: f64,
    #[serde(rename = "SPECTRAL_TYPE", default)]
    pub spectral_type: String,
    #[serde(rename = "VISUAL_MAGNITUDE", default)]
    pub visual_magnitude: f64,
}

/// Star position carried forward to an evaluation time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedPosition {
    pub ra: f64,
    pub dec: f64,
    pub ra_sigma: f64,
    pub dec_sigma: f64,
}

/// Linear proper motion: `angle + elapsed * rate`, sigma grown in quadrature
pub fn project_angle(angle: f64, sigma: f64, rate: f64, rate_sigma: f64, elapsed_years: f64) -> (f64, f64) {
    let projected = angle + elapsed_years * rate;
    let projected_sigma = (sigma.powi(2) + (elapsed_years * rate_sigma).powi(2)).sqrt();
    (projected, projected_sigma)
}

impl StarRecord {
    /// Project onto `years_since_1950` (the catalog epoch basis)
    pub fn project(&self, years_since_1950: f64) -> ProjectedPosition {
        let (ra, ra_sigma) = project_angle(
            self.ra,
            self.ra_sigma,
            self.ra_pm,
            self.ra_pm_sigma,
            years_since_1950 - self.ra_epoch,
        );
        let (dec, dec_sigma) = project_angle(
            self.dec,
            self.dec_sigma,
            self.dec_pm,
            self.dec_pm_sigma,
            years_since_1950 - self.dec_epoch,
        );

        ProjectedPosition {
            ra,
            dec,
            ra_sigma,
            dec_sigma,
        }
    }

    pub fn project_at(&self, epoch: Epoch) -> ProjectedPosition {
        self.project(epoch.julian_years_since_1950())
    }

    /// Distance implied by the parallax: degrees to arcseconds to parsecs to km
    pub fn distance_km<T: Toolkit + ?Sized>(&self, toolkit: &T) -> Result<f64> {
        let parallax_arcsec = toolkit.convert_units(self.parallax, Unit::Degrees, Unit::Arcseconds)?;
        let parsecs = if parallax_arcsec > 0.0 {
            1.0 / parallax_arcsec
        } else {
            NOMINAL_DISTANCE_PARSECS
        };

        toolkit.convert_units(parsecs, Unit::Parsecs, Unit::Km)
    }

    /// Multi-line description of every catalog column
    pub fn describe(&self) -> String {
        format!(
            "Catalog number: {}\n\
             Declination: {:.6} degrees\n\
             Declination epoch: {:.6} years since 1950\n\
             Declination proper motion: {:.6} degrees per year\n\
             Declination proper motion sigma: {:.6} degrees per year\n\
             Declination sigma: {:.6} degrees\n\
             Durchmusterung identifier: {}\n\
             Parallax: {:.6} degrees\n\
             Right ascension: {:.6} degrees\n\
             Right ascension epoch: {:.6} years since 1950\n\
             Right ascension proper motion: {:.6} degrees per year\n\
             Right ascension proper motion sigma: {:.6} degrees per year\n\
             Right ascension sigma: {:.6} degrees\n\
             Spectral type: {}\n\
             Visual magnitude: {:.6}",
            self.catalog_number,
            self.dec,
            self.dec_epoch,
            self.dec_pm,
            self.dec_pm_sigma,
            self.dec_sigma,
            self.dm_number,
            self.parallax,
            self.ra,
            self.ra_epoch,
            self.ra_pm,
            self.ra_pm_sigma,
            self.ra_sigma,
            self.spectral_type,
            self.visual_magnitude,
        )
    }
}

/// Parse star rows from CSV text, skipping rows that fail to deserialize
pub fn parse_star_csv(content: &str) -> Result<Vec<StarRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| GateError::Catalog(e.to_string()))?
        .clone();
    if !headers.iter().any(|h| h == "CATALOG_NUMBER") {
        return Err(GateError::Catalog("missing CATALOG_NUMBER column".to_string()));
    }

    let mut stars = Vec::new();
    let mut error_count = 0;

    for (row, result) in reader.deserialize::<StarRecord>().enumerate() {
        match result {
            Ok(star) => stars.push(star),
            Err(e) => {
                error_count += 1;
                tracing::warn!("Error parsing star row {}: {}", row + 1, e);
            }
        }
    }

    tracing::debug!(rows = stars.len(), errors = error_count, "Parsed star table");

    Ok(stars)
}

pub fn load_star_csv(path: impl AsRef<Path>) -> Result<Vec<StarRecord>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .map_err(|e| GateError::Catalog(format!("{}: {}", path.display(), e)))?;
    parse_star_csv(&content)
}

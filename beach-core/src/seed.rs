//! Embedded seed list of monitored beaches.

use crate::error::{BeachError, Result};
use crate::site::{GeoPoint, Site, SiteId};
use chrono::{DateTime, Utc};
use csv::ReaderBuilder;
use log::warn;
use serde::Deserialize;
use std::collections::HashSet;

/// Embedded CSV of the beaches monitored in this build.
///
/// Columns: id, name, lat, lng, pollution
pub static SEED_CSV: &str = include_str!("../../fixtures/beaches.csv");

#[derive(Debug, Deserialize)]
struct SeedRow {
    id: String,
    name: String,
    lat: f64,
    lng: f64,
    pollution: f64,
}

/// Parse a site fixture into sites with empty history, all stamped `loaded_at`.
///
/// Row order is preserved. Out-of-range pollution values are clamped; bad
/// coordinates, empty ids and duplicate ids are rejected.
pub fn parse_sites(csv_object: &str, loaded_at: DateTime<Utc>) -> Result<Vec<Site>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(csv_object.as_bytes());
    let headers = rdr.headers()?.clone();

    let mut seen: HashSet<SiteId> = HashSet::new();
    let mut sites = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let row: SeedRow = record.deserialize(Some(&headers))?;

        if row.id.is_empty() {
            return Err(BeachError::InvalidRow {
                line,
                reason: "empty site id".to_string(),
            });
        }
        if !(-90.0..=90.0).contains(&row.lat) || !(-180.0..=180.0).contains(&row.lng) {
            return Err(BeachError::InvalidRow {
                line,
                reason: format!("coordinate ({}, {}) out of range", row.lat, row.lng),
            });
        }
        if !(0.0..=1.0).contains(&row.pollution) {
            warn!(
                "Seed pollution {} for '{}' outside [0, 1], clamping",
                row.pollution, row.id
            );
        }

        let id = SiteId::new(row.id);
        if !seen.insert(id.clone()) {
            return Err(BeachError::DuplicateSite(id));
        }
        sites.push(Site::new(
            id,
            row.name,
            GeoPoint::new(row.lat, row.lng),
            row.pollution,
            loaded_at,
        ));
    }
    Ok(sites)
}

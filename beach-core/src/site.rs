use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Stable unique key of a monitored beach (e.g. "juhu").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SiteId(String);

impl SiteId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// An empty id is what the control panel sends for "no beach selected".
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SiteId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for SiteId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for SiteId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for SiteId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Geographic coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Kind of report filed against a beach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportKind {
    /// Raises pollution by one step.
    Complaint,
    /// Lowers pollution by one step.
    Cleanup,
}

impl ReportKind {
    /// Signed change applied to a pollution level.
    pub fn delta(self) -> f64 {
        match self {
            ReportKind::Complaint => PollutionLevel::STEP,
            ReportKind::Cleanup => -PollutionLevel::STEP,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ReportKind::Complaint => "Complaint",
            ReportKind::Cleanup => "Cleanup",
        }
    }
}

/// Normalized pollution scalar, always within `[0.0, 1.0]`.
///
/// The only way to build one is through [`PollutionLevel::new`], which clamps,
/// so a level read back from a `Site` never needs re-validation.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct PollutionLevel(f64);

impl PollutionLevel {
    pub const MIN: f64 = 0.0;
    pub const MAX: f64 = 1.0;
    /// Change applied by a single complaint or cleanup.
    pub const STEP: f64 = 0.1;

    /// Clamp `value` into range. NaN collapses to the minimum.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self(Self::MIN);
        }
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Level after applying one report of `kind`. Saturates at the bounds.
    pub fn stepped(self, kind: ReportKind) -> Self {
        Self::new(self.0 + kind.delta())
    }

    /// Whole percent, rounded half away from zero.
    pub fn percent(self) -> u32 {
        (self.0 * 100.0).round() as u32
    }
}

impl From<f64> for PollutionLevel {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<PollutionLevel> for f64 {
    fn from(level: PollutionLevel) -> Self {
        level.0
    }
}

/// One recorded report. Never modified once appended to a site's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollutionUpdate {
    pub timestamp: DateTime<Utc>,
    pub kind: ReportKind,
    pub previous_value: PollutionLevel,
    pub new_value: PollutionLevel,
    pub description: Option<String>,
}

/// A monitored beach.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub id: SiteId,
    pub name: String,
    /// Fixed for the whole session.
    pub at: GeoPoint,
    pub pollution: PollutionLevel,
    pub last_updated: DateTime<Utc>,
    /// Append-only, oldest first.
    pub history: Vec<PollutionUpdate>,
}

impl Site {
    pub fn new(
        id: impl Into<SiteId>,
        name: impl Into<String>,
        at: GeoPoint,
        pollution: f64,
        last_updated: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            at,
            pollution: PollutionLevel::new(pollution),
            last_updated,
            history: Vec::new(),
        }
    }

    /// The last `n` history entries, most recent first.
    pub fn recent_history(&self, n: usize) -> impl Iterator<Item = &PollutionUpdate> + '_ {
        self.history.iter().rev().take(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn test_pollution_level_clamps() {
        assert_eq!(PollutionLevel::new(1.7).value(), 1.0);
        assert_eq!(PollutionLevel::new(-0.3).value(), 0.0);
        assert_eq!(PollutionLevel::new(f64::NAN).value(), 0.0);
        assert!((PollutionLevel::new(0.42).value() - 0.42).abs() < f64::EPSILON);
    }

    #[test]
    fn test_stepped_saturates_at_bounds() {
        let top = PollutionLevel::new(1.0).stepped(ReportKind::Complaint);
        assert_eq!(top.value(), 1.0);
        let bottom = PollutionLevel::new(0.05).stepped(ReportKind::Cleanup);
        assert_eq!(bottom.value(), 0.0);
    }

    #[test]
    fn test_percent_rounds() {
        assert_eq!(PollutionLevel::new(0.7 + 0.1).percent(), 80);
        assert_eq!(PollutionLevel::new(0.004).percent(), 0);
        assert_eq!(PollutionLevel::new(1.0).percent(), 100);
    }

    #[test]
    fn test_pollution_level_deserializes_clamped() {
        let level: PollutionLevel = serde_json::from_str("3.5").unwrap();
        assert_eq!(level.value(), 1.0);
        assert_eq!(serde_json::to_string(&PollutionLevel::new(0.5)).unwrap(), "0.5");
    }

    #[test]
    fn test_recent_history_newest_first() {
        let mut site = Site::new("juhu", "Juhu Beach", GeoPoint::new(19.1, 72.83), 0.5, at(0));
        for (i, kind) in [ReportKind::Complaint, ReportKind::Cleanup, ReportKind::Complaint, ReportKind::Complaint]
            .into_iter()
            .enumerate()
        {
            site.history.push(PollutionUpdate {
                timestamp: at(i as i64),
                kind,
                previous_value: PollutionLevel::new(0.5),
                new_value: PollutionLevel::new(0.5),
                description: Some(format!("report {i}")),
            });
        }

        let recent: Vec<_> = site
            .recent_history(3)
            .map(|u| u.description.clone().unwrap_or_default())
            .collect();
        assert_eq!(recent, vec!["report 3", "report 2", "report 1"]);
    }

    #[test]
    fn test_report_kind_wire_names() {
        assert_eq!(serde_json::to_string(&ReportKind::Complaint).unwrap(), "\"COMPLAINT\"");
        let kind: ReportKind = serde_json::from_str("\"CLEANUP\"").unwrap();
        assert_eq!(kind, ReportKind::Cleanup);
    }
}

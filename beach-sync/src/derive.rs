//! Heat points derived from the site list.

use beach_core::{GeoPoint, Site};
use std::rc::{Rc, Weak};

/// A site's coordinate paired with its pollution level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatPoint {
    pub at: GeoPoint,
    /// Pollution level, already in `[0, 1]`.
    pub intensity: f64,
}

pub fn heat_points(sites: &[Site]) -> Vec<HeatPoint> {
    sites
        .iter()
        .map(|site| HeatPoint {
            at: site.at,
            intensity: site.pollution.value(),
        })
        .collect()
}

/// Memoizes [`heat_points`] on the identity of the `Rc` site list.
///
/// The reducer keeps the same `Rc` for actions that do not touch sites, so a
/// selection change or loading toggle hands back the previously derived
/// points without recomputing or reallocating them.
#[derive(Default)]
pub struct HeatPointsCache {
    source: Weak<Vec<Site>>,
    points: Rc<[HeatPoint]>,
}

impl HeatPointsCache {
    pub fn get(&mut self, sites: &Rc<Vec<Site>>) -> Rc<[HeatPoint]> {
        if !Weak::ptr_eq(&self.source, &Rc::downgrade(sites)) {
            self.points = heat_points(sites).into();
            self.source = Rc::downgrade(sites);
        }
        self.points.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use beach_core::{reduce, BeachAction, BeachState, ReportKind};
    use chrono::Utc;

    fn state() -> BeachState {
        BeachState::new(vec![
            Site::new("juhu", "Juhu Beach", GeoPoint::new(19.100, 72.830), 0.7, Utc::now()),
            Site::new("aksa", "Aksa Beach", GeoPoint::new(19.176, 72.795), 0.5, Utc::now()),
        ])
    }

    #[test]
    fn test_heat_points_follow_site_order() {
        let points = heat_points(&state().sites);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].at, GeoPoint::new(19.100, 72.830));
        assert!((points[0].intensity - 0.7).abs() < f64::EPSILON);
        assert!((points[1].intensity - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_cache_is_stable_while_site_list_is_shared() {
        let mut cache = HeatPointsCache::default();
        let s0 = state();
        let first = cache.get(&s0.sites);

        let s1 = reduce(&s0, BeachAction::SelectSite("juhu".into()));
        let s2 = reduce(&s1, BeachAction::SetLoading(true));
        assert!(Rc::ptr_eq(&first, &cache.get(&s2.sites)));

        let s3 = reduce(
            &s2,
            BeachAction::report("aksa", ReportKind::Complaint, None, Utc::now()),
        );
        let changed = cache.get(&s3.sites);
        assert!(!Rc::ptr_eq(&first, &changed));
        assert!((changed[1].intensity - 0.6).abs() < 1e-9);
    }
}

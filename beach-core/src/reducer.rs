//! The pollution state engine: `(state, action) -> new state`.

use crate::action::BeachAction;
use crate::error::BeachError;
use crate::site::{PollutionUpdate, ReportKind, SiteId};
use crate::state::BeachState;
use chrono::{DateTime, Utc};
use log::{debug, warn};
use std::rc::Rc;

/// Apply one action, returning the next snapshot.
///
/// `state` is never modified. Fields an action does not touch are carried over
/// as-is, including the `Rc` site list when no site changes.
pub fn reduce(state: &BeachState, action: BeachAction) -> BeachState {
    match action {
        BeachAction::SelectSite(id) => BeachState {
            selected_site_id: Some(id),
            ..state.clone()
        },
        BeachAction::ReportUpdate {
            site_id,
            kind,
            description,
            reported_at,
        } => report_update(state, site_id, kind, description, reported_at),
        BeachAction::SetLoading(is_loading) => BeachState {
            is_loading,
            ..state.clone()
        },
        BeachAction::SetError(error) => BeachState {
            error,
            ..state.clone()
        },
        BeachAction::Unknown => {
            debug!("Ignoring unknown action");
            state.clone()
        }
    }
}

/// Fold `actions` through [`reduce`] starting from `state`.
pub fn replay<I>(state: &BeachState, actions: I) -> BeachState
where
    I: IntoIterator<Item = BeachAction>,
{
    actions
        .into_iter()
        .fold(state.clone(), |acc, action| reduce(&acc, action))
}

fn report_update(
    state: &BeachState,
    site_id: SiteId,
    kind: ReportKind,
    description: Option<String>,
    reported_at: DateTime<Utc>,
) -> BeachState {
    let Some(index) = state.sites.iter().position(|site| site.id == site_id) else {
        warn!("Report for unknown site '{}'", site_id);
        return BeachState {
            error: Some(BeachError::SiteNotFound(site_id).to_string()),
            ..state.clone()
        };
    };

    let mut updated = state.sites[index].clone();
    let previous_value = updated.pollution;
    let new_value = previous_value.stepped(kind);
    updated.pollution = new_value;
    updated.last_updated = reported_at;
    updated.history.push(PollutionUpdate {
        timestamp: reported_at,
        kind,
        previous_value,
        new_value,
        description,
    });

    let mut sites = state.sites.as_ref().clone();
    sites[index] = updated;

    BeachState {
        sites: Rc::new(sites),
        error: None,
        ..state.clone()
    }
}

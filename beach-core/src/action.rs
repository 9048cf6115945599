//! Actions accepted by the state engine.
//!
//! Actions serialize as `{"type": "...", "payload": ...}` so a session can be
//! recorded as a JSON log and replayed through [`crate::replay`]. Decoding
//! goes through [`RawAction`]: a `type` this build does not know becomes
//! [`BeachAction::Unknown`] whatever its payload, and the older
//! `SELECT_BEACH` / `UPDATE_POLLUTION` logs are accepted as well.

use crate::error::Result;
use crate::site::{ReportKind, SiteId};
use chrono::{DateTime, Utc};
use log::debug;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BeachAction {
    /// Move the selection cursor. The id is not validated.
    SelectSite(SiteId),
    /// File a complaint or cleanup against a site.
    ReportUpdate {
        site_id: SiteId,
        kind: ReportKind,
        description: Option<String>,
        /// Stamped by the dispatcher so the reducer stays deterministic.
        reported_at: DateTime<Utc>,
    },
    SetLoading(bool),
    SetError(Option<String>),
    /// Any action type this build does not recognize. Reduces to the same state.
    Unknown,
}

/// Wire shape of one logged action before its `type` is looked at.
#[derive(Debug, Deserialize)]
struct RawAction {
    #[serde(rename = "type")]
    tag: String,
    #[serde(default)]
    payload: Value,
}

/// `ReportUpdate` payload. The aliases cover the `UPDATE_POLLUTION` layout,
/// which has no timestamp; those entries replay at the Unix epoch.
#[derive(Debug, Deserialize)]
struct ReportPayload {
    #[serde(alias = "beachId")]
    site_id: SiteId,
    #[serde(alias = "type")]
    kind: ReportKind,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    reported_at: DateTime<Utc>,
}

impl RawAction {
    fn into_action(self) -> serde_json::Result<BeachAction> {
        let action = match self.tag.as_str() {
            "SELECT_SITE" | "SELECT_BEACH" => BeachAction::SelectSite(serde_json::from_value(self.payload)?),
            "REPORT_UPDATE" | "UPDATE_POLLUTION" => {
                let report: ReportPayload = serde_json::from_value(self.payload)?;
                BeachAction::report(report.site_id, report.kind, report.description, report.reported_at)
            }
            "SET_LOADING" => BeachAction::SetLoading(serde_json::from_value(self.payload)?),
            "SET_ERROR" => BeachAction::SetError(serde_json::from_value(self.payload)?),
            other => {
                debug!("Unrecognized action type '{}'", other);
                BeachAction::Unknown
            }
        };
        Ok(action)
    }
}

impl<'de> Deserialize<'de> for BeachAction {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        RawAction::deserialize(deserializer)?
            .into_action()
            .map_err(D::Error::custom)
    }
}

impl BeachAction {
    /// Convenience constructor that drops blank descriptions.
    pub fn report(
        site_id: impl Into<SiteId>,
        kind: ReportKind,
        description: Option<String>,
        reported_at: DateTime<Utc>,
    ) -> Self {
        BeachAction::ReportUpdate {
            site_id: site_id.into(),
            kind,
            description: description.filter(|d| !d.trim().is_empty()),
            reported_at,
        }
    }
}

/// Decode a JSON array of actions.
pub fn parse_action_log(json: &str) -> Result<Vec<BeachAction>> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{replay, BeachState};

    #[test]
    fn test_report_drops_blank_description() {
        let action = BeachAction::report("juhu", ReportKind::Cleanup, Some("   ".to_string()), Utc::now());
        match action {
            BeachAction::ReportUpdate { description, .. } => assert!(description.is_none()),
            other => panic!("unexpected action {other:?}"),
        }
    }

    #[test]
    fn test_parse_action_log() {
        let log = r#"[
            {"type": "SELECT_SITE", "payload": "juhu"},
            {"type": "REPORT_UPDATE", "payload": {
                "site_id": "juhu", "kind": "COMPLAINT",
                "reported_at": "2025-01-02T03:04:05Z"
            }},
            {"type": "SET_LOADING", "payload": true},
            {"type": "SET_ERROR", "payload": null},
            {"type": "RESET_EVERYTHING"}
        ]"#;
        let actions = parse_action_log(log).unwrap();
        assert_eq!(actions.len(), 5);
        assert_eq!(actions[0], BeachAction::SelectSite(SiteId::from("juhu")));
        assert!(matches!(
            &actions[1],
            BeachAction::ReportUpdate { kind: ReportKind::Complaint, description: None, .. }
        ));
        assert_eq!(actions[2], BeachAction::SetLoading(true));
        assert_eq!(actions[3], BeachAction::SetError(None));
        assert_eq!(actions[4], BeachAction::Unknown);
    }

    #[test]
    fn test_parse_action_log_rejects_garbage() {
        assert!(parse_action_log("{not json").is_err());
        // a known type with a malformed payload is still an error
        assert!(parse_action_log(r#"[{"type": "SET_LOADING", "payload": "yes"}]"#).is_err());
    }

    #[test]
    fn test_unknown_types_with_payloads_decode_as_unknown() {
        let log = r#"[
            {"type": "FUTURE_ACTION", "payload": {"x": 1}},
            {"type": "RESET", "payload": "everything"},
            {"type": "BULK_IMPORT", "payload": [1, 2, 3]}
        ]"#;
        let actions = parse_action_log(log).unwrap();
        assert_eq!(actions, vec![BeachAction::Unknown; 3]);
    }

    #[test]
    fn test_replaying_unknown_actions_leaves_state_unchanged() {
        let state = BeachState::seeded(Utc::now()).unwrap();
        let actions = parse_action_log(
            r#"[{"type": "FUTURE_ACTION", "payload": {"site_id": "juhu", "x": 1}}]"#,
        )
        .unwrap();
        let next = replay(&state, actions);
        assert_eq!(next, state);
        assert!(std::rc::Rc::ptr_eq(&next.sites, &state.sites));
    }

    #[test]
    fn test_parse_legacy_action_names() {
        let log = r#"[
            {"type": "SELECT_BEACH", "payload": "juhu"},
            {"type": "UPDATE_POLLUTION", "payload": {
                "beachId": "juhu", "type": "COMPLAINT", "description": "plastic"
            }},
            {"type": "UPDATE_POLLUTION", "payload": {
                "beachId": "versova", "type": "CLEANUP", "description": ""
            }}
        ]"#;
        let actions = parse_action_log(log).unwrap();
        assert_eq!(actions[0], BeachAction::SelectSite(SiteId::from("juhu")));
        assert_eq!(
            actions[1],
            BeachAction::ReportUpdate {
                site_id: SiteId::from("juhu"),
                kind: ReportKind::Complaint,
                description: Some("plastic".to_string()),
                reported_at: DateTime::<Utc>::default(),
            }
        );
        assert!(matches!(
            &actions[2],
            BeachAction::ReportUpdate { kind: ReportKind::Cleanup, description: None, .. }
        ));

        let state = replay(&BeachState::seeded(Utc::now()).unwrap(), actions);
        assert_eq!(state.selected_site().map(|s| s.id.as_str()), Some("juhu"));
        assert_eq!(state.site("juhu").unwrap().pollution.percent(), 80);
        assert_eq!(state.site("versova").unwrap().pollution.percent(), 20);
    }

    #[test]
    fn test_serialized_actions_decode_back() {
        let actions = vec![
            BeachAction::SelectSite(SiteId::from("aksa")),
            BeachAction::report("aksa", ReportKind::Cleanup, Some("nets".to_string()), Utc::now()),
            BeachAction::SetError(Some("boom".to_string())),
            BeachAction::Unknown,
        ];
        let json = serde_json::to_string(&actions).unwrap();
        assert_eq!(parse_action_log(&json).unwrap(), actions);
    }
}

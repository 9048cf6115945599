//! Floating control panel: site selector, report form and recent updates.

use crate::config::RECENT_UPDATES;
use crate::state::AppState;
use beach_core::format::{display_timestamp, one_decimal};
use beach_core::{PollutionUpdate, ReportKind};
use dioxus::prelude::*;

const LABEL_STYLE: &str = "display: block; font-size: 14px; font-weight: 500; color: #374151; margin-bottom: 4px;";
const INPUT_STYLE: &str = "width: 100%; box-sizing: border-box; padding: 8px; border: 1px solid #D1D5DB; border-radius: 6px;";

/// Panel in the top-left corner of the map.
#[component]
pub fn ControlPanel() -> Element {
    let state = use_context::<AppState>();
    let has_selection = state.beach.read().selected_site().is_some();

    rsx! {
        div {
            style: "position: absolute; top: 16px; left: 16px; z-index: 1000; max-width: 384px; padding: 16px; background: white; color: #111827; border-radius: 8px; box-shadow: 0 10px 15px rgba(0, 0, 0, 0.1); font-family: sans-serif;",
            h2 {
                style: "margin: 0 0 16px 0; font-size: 18px; font-weight: 600;",
                "Beach Pollution Control"
            }
            SiteSelector {}
            if has_selection {
                ReportForm {}
                RecentUpdates {}
            }
        }
    }
}

/// Beach dropdown. Choosing the placeholder clears the selection.
#[component]
pub fn SiteSelector() -> Element {
    let mut state = use_context::<AppState>();
    let beach = state.beach.read().clone();
    let selected = beach
        .selected_site_id
        .as_ref()
        .map(|id| id.to_string())
        .unwrap_or_default();
    let options: Vec<(String, String)> = beach
        .sites
        .iter()
        .map(|site| {
            (
                site.id.to_string(),
                format!("{} ({}% pollution)", site.name, site.pollution.percent()),
            )
        })
        .collect();

    let on_change = move |evt: Event<FormData>| {
        state.select_site(evt.value());
    };

    rsx! {
        div {
            style: "margin-bottom: 16px;",
            label {
                r#for: "beach-select",
                style: LABEL_STYLE,
                "Select Beach"
            }
            select {
                id: "beach-select",
                style: INPUT_STYLE,
                onchange: on_change,
                option {
                    value: "",
                    selected: selected.is_empty(),
                    "Select a beach..."
                }
                for (id, label) in options.iter() {
                    option {
                        key: "{id}",
                        value: "{id}",
                        selected: *id == selected,
                        "{label}"
                    }
                }
            }
        }
    }
}

/// File a report against the selected site. Clears the description on submit.
fn submit_report(mut state: AppState, mut description: Signal<String>, kind: ReportKind) {
    let site_id = state.beach.peek().selected_site().map(|site| site.id.clone());
    let Some(site_id) = site_id else {
        return;
    };
    let text = description.peek().clone();
    state.report_update(site_id, kind, Some(text));
    description.set(String::new());
}

/// Description box plus the complaint and cleanup buttons.
#[component]
pub fn ReportForm() -> Element {
    let state = use_context::<AppState>();
    let mut description = use_signal(String::new);

    rsx! {
        div {
            style: "margin-bottom: 16px;",
            label {
                r#for: "report-description",
                style: LABEL_STYLE,
                "Description (optional)"
            }
            textarea {
                id: "report-description",
                style: INPUT_STYLE,
                rows: "3",
                placeholder: "Add details about the complaint or cleanup...",
                value: "{description}",
                oninput: move |evt: Event<FormData>| description.set(evt.value()),
            }
        }
        div {
            style: "display: flex; gap: 8px;",
            button {
                style: "flex: 1; padding: 8px 16px; background: #EF4444; color: white; border: none; border-radius: 6px; cursor: pointer;",
                onclick: move |_| submit_report(state, description, ReportKind::Complaint),
                "🚨 File Complaint"
            }
            button {
                style: "flex: 1; padding: 8px 16px; background: #22C55E; color: white; border: none; border-radius: 6px; cursor: pointer;",
                onclick: move |_| submit_report(state, description, ReportKind::Cleanup),
                "🧹 Report Cleanup"
            }
        }
    }
}

/// One rendered history entry.
#[derive(Clone, PartialEq)]
struct UpdateRow {
    heading: String,
    time: String,
    description: String,
    change: String,
    style: &'static str,
}

impl From<&PollutionUpdate> for UpdateRow {
    fn from(update: &PollutionUpdate) -> Self {
        let (icon, style) = match update.kind {
            ReportKind::Complaint => ("🚨", "background: #FEE2E2; color: #991B1B;"),
            ReportKind::Cleanup => ("🧹", "background: #DCFCE7; color: #166534;"),
        };
        Self {
            heading: format!("{} {}", icon, update.kind.label()),
            time: display_timestamp(&update.timestamp),
            description: update.description.clone().unwrap_or_default(),
            change: format!(
                "Pollution: {} → {}",
                one_decimal(update.previous_value.value()),
                one_decimal(update.new_value.value())
            ),
            style,
        }
    }
}

/// Latest history entries of the selected site, newest first. Hidden until
/// the site has any.
#[component]
pub fn RecentUpdates() -> Element {
    let state = use_context::<AppState>();
    let rows: Vec<UpdateRow> = state
        .beach
        .read()
        .selected_site()
        .map(|site| site.recent_history(RECENT_UPDATES).map(UpdateRow::from).collect())
        .unwrap_or_default();

    if rows.is_empty() {
        return rsx! {};
    }

    rsx! {
        div {
            style: "margin-top: 16px;",
            h3 {
                style: "margin: 0 0 8px 0; font-size: 14px; font-weight: 500; color: #374151;",
                "Recent Updates"
            }
            div {
                style: "max-height: 160px; overflow-y: auto;",
                for row in rows.iter() {
                    div {
                        style: "font-size: 14px; padding: 8px; border-radius: 6px; margin-bottom: 4px; {row.style}",
                        div { style: "font-weight: 500;", "{row.heading}" }
                        div { style: "font-size: 12px;", "{row.time}" }
                        if !row.description.is_empty() {
                            div { style: "font-size: 12px; margin-top: 4px;", "{row.description}" }
                        }
                        div { style: "font-size: 12px; margin-top: 4px;", "{row.change}" }
                    }
                }
            }
        }
    }
}

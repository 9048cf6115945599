//! Error banner component.

use crate::state::AppState;
use beach_core::BeachAction;
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ErrorBannerProps {
    pub message: String,
}

/// Non-modal banner along the bottom of the map. Dismissing it clears the
/// error; the next successful report clears it as well.
#[component]
pub fn ErrorBanner(props: ErrorBannerProps) -> Element {
    let mut state = use_context::<AppState>();

    let on_dismiss = move |_| {
        state.dispatch(BeachAction::SetError(None));
    };

    rsx! {
        div {
            style: "position: absolute; bottom: 16px; left: 16px; right: 16px; z-index: 1000; display: flex; justify-content: space-between; align-items: center; padding: 12px 16px; background: #FFEBEE; color: #C62828; border-radius: 4px; border: 1px solid #EF9A9A;",
            span {
                strong { "Error: " }
                "{props.message}"
            }
            button {
                style: "background: none; border: none; color: #C62828; font-size: 16px; cursor: pointer;",
                title: "Dismiss",
                onclick: on_dismiss,
                "✕"
            }
        }
    }
}

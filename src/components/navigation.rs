use dioxus::prelude::*;
use dioxus_i18n::t;
use sprig_auth::{CloudSaveState, PersistenceState};

/// Top bar of the editor with the save button that opens the prompt
#[component]
pub fn NavigationBar(persistence_state: Signal<PersistenceState>, on_save: EventHandler<()>) -> Element {
    let nav_style = "display: flex; justify-content: space-between; align-items: center; padding: 10px 16px; background: #1f2d3d; color: #ffffff;";

    let label = match persistence_state() {
        PersistenceState::NotPersisted => t!("nav-save"),
        PersistenceState::Persisted {
            cloud_save_state: CloudSaveState::Saving,
        } => t!("nav-saving"),
        PersistenceState::Persisted {
            cloud_save_state: CloudSaveState::Saved,
        } => t!("nav-saved"),
    };

    rsx! {
        div {
            style: "{nav_style}",

            span { style: "font-size: 18px; font-weight: 700;", {t!("editor-title")} }

            button {
                style: "padding: 8px 16px; border: none; border-radius: 8px; cursor: pointer; font-size: 14px; background: #ec3750; color: #ffffff;",
                onclick: move |_| on_save.call(()),
                "💾 {label}"
            }
        }
    }
}

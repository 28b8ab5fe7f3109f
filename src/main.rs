use dioxus::prelude::*;
use dioxus_i18n::prelude::use_init_i18n;
use sprig_auth::{use_auth_helper, PersistenceState};

mod components;
mod config;
mod error;
mod i18n;
mod models;
mod services;

use components::{NavigationBar, SavePrompt};
use config::AppConfig;
use services::Backends;

fn main() {
    init_logging();
    dioxus::launch(App);
}

fn init_logging() {
    #[cfg(target_os = "android")]
    android_logger::init_once(
        android_logger::Config::default().with_max_level(log::LevelFilter::Debug),
    );

    #[cfg(not(any(target_os = "android", target_arch = "wasm32")))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // The browser console subscriber is tracing based; forward `log` records into it
    #[cfg(target_arch = "wasm32")]
    {
        dioxus::logger::initialize_default();
        if let Err(e) = tracing_log::LogTracer::init() {
            dioxus::logger::tracing::warn!("log records will not reach the console: {}", e);
        }
    }
}

#[component]
fn App() -> Element {
    use_init_i18n(i18n::init_i18n);
    let config = use_hook(AppConfig::load);
    use_context_provider(|| Backends::demo(config.demo.clone()));

    let persistence_state = use_signal(PersistenceState::default);
    let mut prompt_open = use_signal(|| false);
    let mut auth = use_auth_helper(config.logged_in.initial_stage());

    rsx! {
        div { style: "display: flex; flex-direction: column; height: 100vh; font-family: sans-serif;",

            NavigationBar {
                persistence_state,
                on_save: move |_| {
                    auth.write().begin_email_entry();
                    prompt_open.set(true);
                },
            }

            // Editor area
            div { style: "flex: 1; overflow-y: auto; padding: 16px; background: #f9fafc;",
                textarea {
                    style: "width: 100%; height: 100%; border: none; background: transparent; font-family: monospace;",
                    spellcheck: false,
                    "setLegend(\n  [ player, bitmap`...` ]\n)"
                }
            }

            if prompt_open() {
                SavePrompt {
                    logged_in: config.logged_in,
                    persistence_state,
                    auth,
                    on_close: move |_| prompt_open.set(false),
                }
            }
        }
    }
}

use dioxus::prelude::*;

const BUTTON_STYLE: &str = "padding: 8px 16px; border: none; border-radius: 6px; cursor: pointer; font-size: 14px; font-weight: 600;";
const ACCENT_STYLE: &str = "background: #ec3750; color: #ffffff;";
const PLAIN_STYLE: &str = "background: #e0e6ed; color: #1f2d3d;";

/// Button with an optional spinner while a request is running
#[component]
pub fn Button(
    #[props(default)] accent: bool,
    #[props(default = "button".to_string())] r#type: String,
    #[props(default)] disabled: bool,
    #[props(default)] loading: bool,
    #[props(default)] onclick: Option<EventHandler<MouseEvent>>,
    children: Element,
) -> Element {
    let colors = if accent { ACCENT_STYLE } else { PLAIN_STYLE };
    let opacity = if disabled || loading { "opacity: 0.6;" } else { "" };

    rsx! {
        button {
            r#type: r#type,
            style: "{BUTTON_STYLE} {colors} {opacity}",
            disabled: disabled || loading,
            "aria-busy": loading,
            onclick: move |evt| {
                if let Some(handler) = onclick {
                    handler.call(evt);
                }
            },
            if loading {
                span { class: "spinner", style: "margin-right: 6px;", "⏳" }
            }
            {children}
        }
    }
}

/// Inline button styled as a text link
#[component]
pub fn LinkButton(
    #[props(default)] disabled: bool,
    onclick: EventHandler<MouseEvent>,
    children: Element,
) -> Element {
    rsx! {
        button {
            r#type: "button",
            style: "background: none; border: none; padding: 0; color: #338eda; text-decoration: underline; cursor: pointer; font-size: inherit;",
            disabled,
            onclick: move |evt| onclick.call(evt),
            {children}
        }
    }
}

//! Loading indicator.

use dioxus::prelude::*;

/// Props for the [`Spinner`] component.
#[derive(Props, Clone, PartialEq)]
pub struct SpinnerProps {
    /// Render the large variant used in the result panel.
    #[props(default)]
    large: bool,
}

/// A spinning ring.
#[component]
pub fn Spinner(props: SpinnerProps) -> Element {
    let size = if props.large {
        "h-16 w-16 border-4"
    } else {
        "h-5 w-5 border-2"
    };

    rsx! {
        div {
            class: "{size} inline-block animate-spin rounded-full border-pink-400 border-t-transparent",
            role: "status",
            aria_label: "Loading",
        }
    }
}

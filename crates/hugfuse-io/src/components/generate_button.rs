//! The generate trigger.

use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::LdHeart;

use super::Spinner;

/// Props for the [`GenerateButton`] component.
#[derive(Props, Clone, PartialEq)]
pub struct GenerateButtonProps {
    /// Both images are present and nothing is in flight.
    enabled: bool,
    /// A generation is running.
    loading: bool,
    on_click: EventHandler<MouseEvent>,
}

/// Round button that starts a generation.
///
/// Disabled unless `enabled`; shows a spinner while `loading`.
#[component]
pub fn GenerateButton(props: GenerateButtonProps) -> Element {
    let on_click = props.on_click;

    rsx! {
        div { class: "text-center mb-8",
            button {
                class: "bg-pink-600 hover:bg-pink-700 disabled:bg-pink-900 disabled:text-gray-500 disabled:cursor-not-allowed text-white font-bold py-3 px-8 rounded-full transition-all duration-300 ease-in-out transform hover:scale-105 shadow-lg flex items-center justify-center mx-auto",
                disabled: !props.enabled,
                onclick: move |evt| on_click.call(evt),

                if props.loading {
                    Spinner {}
                    span { class: "ml-2", "Generating..." }
                } else {
                    Icon {
                        class: "text-pink-200",
                        width: 28,
                        height: 28,
                        icon: LdHeart,
                    }
                    span { class: "ml-2 text-lg", "Generate Hug Image" }
                }
            }
        }
    }
}

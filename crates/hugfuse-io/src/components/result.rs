//! Result area: spinner, error, generated image, or placeholder.

use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::LdDownload;
use hugfuse_core::{ResultView, parse_data_url};

use super::Spinner;
use crate::download;

/// Base filename (without extension) for downloaded results.
const DOWNLOAD_BASENAME: &str = "hug";

/// Props for the [`ResultPanel`] component.
#[derive(Props, Clone, PartialEq)]
pub struct ResultPanelProps {
    /// What to show, from [`hugfuse_core::Session::view`].
    view: ResultView,
}

/// Dashed panel that renders the current [`ResultView`].
///
/// A generated image gets a download button underneath it.
#[component]
pub fn ResultPanel(props: ResultPanelProps) -> Element {
    // Keyed by the image URL so a new result does not show an old failure.
    let mut download_error = use_signal(|| Option::<(String, String)>::None);

    let body = match props.view {
        ResultView::Loading => rsx! {
            div { class: "text-center",
                Spinner { large: true }
                p { class: "mt-4 text-lg text-gray-300", "AI is working its magic... Please wait." }
            }
        },
        ResultView::Error(message) => rsx! {
            div { class: "text-center text-red-400",
                p { class: "font-bold", "An Error Occurred" }
                p { "{message}" }
            }
        },
        ResultView::Image(url) => {
            let on_download = {
                let url = url.clone();
                move |_| {
                    let outcome = parse_data_url(&url)
                        .map_err(|e| e.to_string())
                        .and_then(|image| {
                            download::download_image(&image, DOWNLOAD_BASENAME)
                                .map_err(|e| e.to_string())
                        });
                    match outcome {
                        Ok(()) => download_error.set(None),
                        Err(e) => {
                            tracing::error!(error = %e, "download failed");
                            download_error.set(Some((url.clone(), format!("Download failed: {e}"))));
                        }
                    }
                }
            };
            let error = download_error()
                .filter(|(failed_url, _)| *failed_url == url)
                .map(|(_, message)| message);
            rsx! {
                div { class: "flex flex-col items-center gap-4",
                    img {
                        src: "{url}",
                        alt: "Generated result",
                        class: "max-w-full max-h-[80vh] rounded-xl object-contain shadow-2xl",
                    }
                    button {
                        class: "flex items-center gap-2 px-4 py-2 bg-violet-600 hover:bg-violet-700 rounded-full text-white font-medium transition-colors",
                        onclick: on_download,
                        Icon { width: 18, height: 18, icon: LdDownload }
                        "Download"
                    }
                    if let Some(ref err) = error {
                        p { class: "text-red-400 text-sm", "{err}" }
                    }
                }
            }
        }
        ResultView::Placeholder => rsx! {
            div { class: "text-center text-gray-500",
                p { class: "text-xl", "Your generated image will appear here." }
                p { "Upload two images and click the generate button to start." }
            }
        },
    };

    rsx! {
        div { class: "bg-gray-800 border-2 border-dashed border-gray-600 rounded-2xl p-4 md:p-8 min-h-[30rem] flex items-center justify-center",
            {body}
        }
    }
}

use std::rc::Rc;

use dioxus::prelude::*;
use hugfuse_core::{GeneratorConfig, ImageData, LoadError, Session, Slot};
use hugfuse_io::{GenerateButton, Header, ImageUploader, ResultPanel};

/// Tailwind Play CDN; compiles utility classes in the browser.
const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";

fn main() {
    dioxus::logger::initialize_default();
    dioxus::launch(app);
}

/// Generator settings baked in at build time.
///
/// `HUGFUSE_API_KEY` is required for generation to succeed;
/// `HUGFUSE_MODEL` and `HUGFUSE_BASE_URL` override the defaults.
fn generator_config() -> GeneratorConfig {
    let config = GeneratorConfig::from_values(
        option_env!("HUGFUSE_API_KEY"),
        option_env!("HUGFUSE_MODEL"),
        option_env!("HUGFUSE_BASE_URL"),
    );
    if config.api_key.is_none() {
        tracing::warn!("HUGFUSE_API_KEY was not set at build time; generation will fail");
    }
    tracing::debug!(?config, "generator configured");
    config
}

/// Root application component.
///
/// Holds the [`Session`] state machine in a signal and wires the two
/// uploaders, the generate button, and the result panel to it.
fn app() -> Element {
    // --- Application state ---
    let mut session = use_signal(Session::default);
    let config = use_hook(|| Rc::new(generator_config()));

    // --- Upload handlers ---
    // The error is cleared as soon as a file is picked, before the read.
    let on_upload_start = move |()| {
        session.write().begin_upload();
    };
    let mut on_upload = move |slot: Slot, outcome: Result<ImageData, LoadError>| {
        let mut session = session.write();
        match outcome {
            Ok(image) => session.set_image(slot, image.to_data_url()),
            Err(_) => session.upload_failed(),
        }
    };

    // --- Generate handler ---
    // The session refuses to start while a generation is in flight, so
    // a double click cannot send two requests.
    let on_generate = move |_: MouseEvent| {
        let started = session.write().begin_generation();
        let inputs = match started {
            Ok(inputs) => inputs,
            Err(e) => {
                tracing::warn!(error = %e, "generation not started");
                return;
            }
        };
        let config = Rc::clone(&config);

        spawn(async move {
            // Yield to the browser event loop so the loading state paints
            // before the request body is serialized.
            gloo_timers::future::TimeoutFuture::new(0).await;

            let outcome =
                hugfuse_io::generate_hug_image(&config, &inputs.first, &inputs.second).await;
            if let Err(e) = &outcome {
                tracing::error!(error = %e, "generation failed");
            }
            session.write().finish_generation(outcome);
        });
    };

    let (first_src, second_src, can_generate, loading, view) = {
        let session = session.read();
        (
            session.image(Slot::First).map(str::to_owned),
            session.image(Slot::Second).map(str::to_owned),
            session.can_generate(),
            session.is_loading(),
            session.view(),
        )
    };

    // --- Layout ---
    rsx! {
        document::Script { src: TAILWIND_CDN }

        div { class: "min-h-screen bg-gray-900 text-gray-100 flex flex-col font-sans",
            Header {}

            main { class: "flex-grow flex flex-col items-center justify-center p-4 md:p-8",
                div { class: "w-full max-w-5xl",
                    div { class: "grid grid-cols-1 md:grid-cols-2 gap-8 mb-8",
                        ImageUploader {
                            slot: Slot::First,
                            image_src: first_src,
                            on_upload_start: on_upload_start,
                            on_upload: move |outcome: Result<ImageData, LoadError>| {
                                on_upload(Slot::First, outcome);
                            },
                        }
                        ImageUploader {
                            slot: Slot::Second,
                            image_src: second_src,
                            on_upload_start: on_upload_start,
                            on_upload: move |outcome: Result<ImageData, LoadError>| {
                                on_upload(Slot::Second, outcome);
                            },
                        }
                    }

                    GenerateButton {
                        enabled: can_generate,
                        loading,
                        on_click: on_generate,
                    }

                    ResultPanel { view }
                }
            }
        }
    }
}

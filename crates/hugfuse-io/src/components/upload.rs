//! Image upload slot with click-to-pick and drag-and-drop.

use dioxus::html::{FileData, HasFileData};
use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::LdImagePlus;
use hugfuse_core::file::ACCEPTED_TYPES;
use hugfuse_core::{ImageData, LoadError, Slot};

/// Props for the [`ImageUploader`] component.
#[derive(Props, Clone, PartialEq)]
pub struct ImageUploaderProps {
    /// Which person this uploader is for; sets the title and input id.
    slot: Slot,
    /// Data URL of the current image, shown as a preview.
    image_src: Option<String>,
    /// Called as soon as a file is picked or dropped, before it is read.
    on_upload_start: EventHandler<()>,
    /// Called with the converted image, or why the file was rejected.
    on_upload: EventHandler<Result<ImageData, LoadError>>,
}

/// A clickable drop zone for one person's photo.
///
/// Clicking opens the file picker (PNG, JPEG, WebP); files can also be
/// dropped onto it. `on_upload_start` fires once a file is chosen; the
/// first file is then read, converted with
/// [`ImageData::from_file_bytes`], and the outcome passed to
/// `on_upload`.
#[component]
pub fn ImageUploader(props: ImageUploaderProps) -> Element {
    let mut dragging = use_signal(|| false);
    let slot = props.slot;
    let on_upload_start = props.on_upload_start;
    let on_upload = props.on_upload;

    // Shared by the picker and drop paths.
    let process_files = move |files: Vec<FileData>| async move {
        let Some(file) = files.first() else {
            return;
        };
        on_upload_start.call(());
        let name = file.name();
        let outcome = match file.read_bytes().await {
            Ok(bytes) => ImageData::from_file_bytes(&bytes, &name),
            Err(e) => Err(LoadError::Read(e.to_string())),
        };
        if let Err(e) = &outcome {
            tracing::error!(%slot, file = %name, error = %e, "error reading file");
        }
        on_upload.call(outcome);
    };

    let handle_files = move |evt: FormEvent| async move {
        process_files(evt.files()).await;
    };

    let handle_drop = move |evt: DragEvent| async move {
        evt.prevent_default();
        dragging.set(false);
        process_files(evt.files()).await;
    };

    let id = slot.input_id();
    let title = slot.title();
    let border_class = if dragging() {
        "border-pink-500 bg-gray-700"
    } else {
        "border-gray-600 bg-gray-800 hover:border-pink-500 hover:bg-gray-700"
    };
    let overlay_text = if props.image_src.is_some() {
        "Change Image"
    } else {
        "Upload Image"
    };

    rsx! {
        div { class: "flex flex-col items-center",
            h2 { class: "text-xl font-semibold mb-4 text-gray-300", "{title}" }

            label {
                r#for: "{id}",
                class: "w-full h-80 rounded-2xl border-2 border-dashed flex items-center justify-center cursor-pointer transition-all duration-300 overflow-hidden relative group {border_class}",
                ondragover: move |evt| {
                    evt.prevent_default();
                    dragging.set(true);
                },
                ondragleave: move |_| {
                    dragging.set(false);
                },
                ondrop: handle_drop,

                input {
                    r#type: "file",
                    id: "{id}",
                    accept: ACCEPTED_TYPES,
                    class: "hidden",
                    onchange: handle_files,
                }

                if let Some(ref src) = props.image_src {
                    img {
                        src: "{src}",
                        alt: "Upload preview",
                        class: "w-full h-full object-cover",
                    }
                } else {
                    div { class: "text-center text-gray-500",
                        Icon {
                            class: "mx-auto",
                            width: 48,
                            height: 48,
                            icon: LdImagePlus,
                        }
                        p { class: "mt-2", "Click to upload image" }
                    }
                }

                div { class: "absolute inset-0 bg-black/50 flex items-center justify-center opacity-0 group-hover:opacity-100 transition-opacity duration-300",
                    span { class: "text-white text-lg font-bold", "{overlay_text}" }
                }
            }
        }
    }
}

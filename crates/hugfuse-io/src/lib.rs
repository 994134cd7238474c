//! hugfuse-io: Browser I/O and Dioxus component library.
//!
//! Handles reading uploaded files, the HTTP call to the image
//! generation service, and Blob downloads, and provides the UI
//! components for the hugfuse web application.

pub mod components;
pub mod download;
pub mod generate;

pub use components::{GenerateButton, Header, ImageUploader, ResultPanel, Spinner};
pub use generate::generate_hug_image;

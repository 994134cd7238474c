//! Dioxus UI components for hugfuse.
//!
//! Provides the page header, the per-person image uploader, the
//! generate button, the loading spinner, and the result panel.

mod generate_button;
mod header;
mod result;
mod spinner;
mod upload;

pub use generate_button::GenerateButton;
pub use header::Header;
pub use result::ResultPanel;
pub use spinner::Spinner;
pub use upload::ImageUploader;

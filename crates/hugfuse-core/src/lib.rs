//! hugfuse-core: Pure logic for the hugfuse web app (sans-IO).
//!
//! Holds everything that does not need a browser:
//! the in-memory image model and its data URL codec, the screen's
//! session state machine, the request/response contract of the image
//! generation service, and the generator configuration.
//!
//! This crate has **no I/O dependencies** -- the HTTP call, file
//! reading, and UI components live in `hugfuse-io`.

pub mod config;
pub mod data_url;
pub mod file;
pub mod generate;
pub mod session;
pub mod types;

pub use config::GeneratorConfig;
pub use data_url::parse_data_url;
pub use generate::GenerateError;
pub use session::{GenerationInputs, ResultView, Session, SessionError, Slot};
pub use types::{DataUrlError, ImageData, LoadError};

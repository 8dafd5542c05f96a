//! Application layer: startup wiring and the transcription session.

pub mod controller;
pub mod session;

pub use controller::AppController;
pub use session::{SessionEvent, TranscriptionSession};

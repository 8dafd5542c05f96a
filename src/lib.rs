//! Parscribe: offline Persian speech-to-text with proper text handling.
//!
//! Audio files are decoded locally, transcribed with whisper.cpp, and the
//! recognized text is run through a Persian pipeline that keeps two forms
//! apart: logical text (canonical reading order, the only form that is ever
//! saved or copied) and visual text (reshaped and bidi-reordered, for
//! display only).

#![forbid(unsafe_code)]

pub mod adapters;
pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod ports;
pub mod text;

pub use app::{AppController, SessionEvent, TranscriptionSession};
pub use domain::{AppConfig, DomainError, LogicalText, ModelSize, Transcript, VisualText};
pub use text::TextPipeline;

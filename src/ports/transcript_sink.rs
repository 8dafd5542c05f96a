use crate::domain::{DomainError, LogicalText};

/// Port for exporting a transcript (file save, clipboard copy).
///
/// Takes [`LogicalText`] only: visually-shaped text cannot be persisted or
/// copied, which is the round-trip safety contract of the whole pipeline.
pub trait TranscriptSink: Send + Sync {
    fn persist(&self, text: &LogicalText) -> Result<(), DomainError>;
}

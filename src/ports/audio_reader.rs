use std::path::Path;

use crate::domain::{AudioBuffer, DomainError};

/// Port for decoding an audio file into samples.
///
/// Readers are synchronous; the session runs them on a blocking task. The
/// session tries readers in order and reports a combined error when all of
/// them fail.
pub trait AudioReader: Send + Sync {
    /// Short name used in logs and combined error messages.
    fn name(&self) -> &'static str;

    /// Decode the file into a mono buffer at its native sample rate.
    fn read(&self, path: &Path) -> Result<AudioBuffer, DomainError>;
}

//! Optional text-processing capabilities.
//!
//! Each capability is a strategy the pipeline may or may not have: the real
//! adapters live in `adapters`, and every trait ships a trivial identity
//! implementation so "capability absent" is modeled as a value rather than as
//! scattered conditionals. Capabilities are selected once at pipeline
//! construction and held as read-only configuration.

use crate::domain::DomainError;

/// Linguistic normalization (diacritic stripping, whitespace cleanup).
///
/// Must not convert digits or change letter case; those are separate,
/// explicitly controlled pipeline stages.
pub trait LinguisticNormalizer: Send + Sync {
    fn normalize(&self, text: &str) -> Result<String, DomainError>;
}

/// Conversion of Western digits (0-9) to Persian digits.
pub trait DigitConverter: Send + Sync {
    fn western_to_persian(&self, text: &str) -> Result<String, DomainError>;
}

/// Contextual letterform selection for connected scripts.
pub trait GlyphReshaper: Send + Sync {
    fn reshape(&self, text: &str) -> Result<String, DomainError>;
}

/// Bidirectional reordering of logical text into visual order.
pub trait BidiReorderer: Send + Sync {
    fn to_visual_order(&self, text: &str) -> Result<String, DomainError>;
}

/// Identity implementation of every capability: used wherever the real
/// backend is unavailable, keeping the pipeline total.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityCapability;

impl LinguisticNormalizer for IdentityCapability {
    fn normalize(&self, text: &str) -> Result<String, DomainError> {
        Ok(text.to_string())
    }
}

impl DigitConverter for IdentityCapability {
    fn western_to_persian(&self, text: &str) -> Result<String, DomainError> {
        Ok(text.to_string())
    }
}

impl GlyphReshaper for IdentityCapability {
    fn reshape(&self, text: &str) -> Result<String, DomainError> {
        Ok(text.to_string())
    }
}

impl BidiReorderer for IdentityCapability {
    fn to_visual_order(&self, text: &str) -> Result<String, DomainError> {
        Ok(text.to_string())
    }
}

use crate::domain::DomainError;
use crate::ports::DigitConverter;

/// Offset from ASCII '0' to Persian '۰' (U+06F0).
const PERSIAN_ZERO: u32 = 0x06F0;

/// Converts Western digits (0-9) to Extended Arabic-Indic (Persian) digits.
/// Persian digits and all other characters pass through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct PersianDigitConverter;

impl DigitConverter for PersianDigitConverter {
    fn western_to_persian(&self, text: &str) -> Result<String, DomainError> {
        Ok(text
            .chars()
            .map(|c| {
                if c.is_ascii_digit() {
                    let d = c as u32 - '0' as u32;
                    char::from_u32(PERSIAN_ZERO + d).unwrap_or(c)
                } else {
                    c
                }
            })
            .collect())
    }
}

/// Unicode block containing Persian/Arabic script (U+0600..U+06FF).
const ARABIC_BLOCK: std::ops::RangeInclusive<char> = '\u{0600}'..='\u{06FF}';

/// Heuristically detect whether text contains Persian/Arabic script.
///
/// True iff at least one character falls in the Arabic Unicode block.
/// Empty input is never Persian.
pub fn is_persian(text: &str) -> bool {
    text.chars().any(|c| ARABIC_BLOCK.contains(&c))
}

/// Whether a recognizer language tag indicates Persian.
pub fn language_hints_persian(language: Option<&str>) -> bool {
    matches!(
        language.map(|l| l.trim().to_lowercase()).as_deref(),
        Some("fa") | Some("fas") | Some("fa-ir") | Some("persian")
    )
}

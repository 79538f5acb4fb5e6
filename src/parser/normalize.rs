use super::patterns::Patterns;

/// Canonicalize line endings, dash variants and blank-line runs. Every
/// downstream pattern assumes LF endings and hyphen-minus dashes.
pub fn normalize(patterns: &Patterns, text: &str) -> String {
    let text = text.replace("\r\n", "\n");
    let text = patterns.dash_variants.replace_all(&text, "-");
    patterns.blank_runs.replace_all(&text, "\n\n").into_owned()
}

/// Strategy seam for the language-fidelity check. What counts as "the
/// response came back in the requested language" is a heuristic; callers can
/// plug in something smarter than the default without touching the scorer.
pub trait LanguageFidelity: Send + Sync {
    fn name(&self) -> &'static str;
    /// True if `text` plausibly matches the requested non-default language.
    fn matches(&self, target_language: &str, text: &str) -> bool;
}

/// Default heuristic: a non-default-language response should contain at
/// least one non-ASCII character, i.e. it did not silently fall back to
/// English.
pub struct NonAsciiFidelity;

impl LanguageFidelity for NonAsciiFidelity {
    fn name(&self) -> &'static str {
        "non_ascii"
    }

    fn matches(&self, _target_language: &str, text: &str) -> bool {
        text.chars().any(|c| !c.is_ascii())
    }
}

/// Case-insensitive substring match.
pub(crate) fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Split recommendations text into actionable steps. The endpoint is asked
/// for semicolon-separated steps; line breaks count as delimiters too.
pub(crate) fn split_steps(text: &str) -> Vec<&str> {
    text.split(|c| c == ';' || c == '\n')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_split_on_semicolons_and_newlines() {
        let steps = split_steps("rest; drink fluids\nsee a doctor if fever persists; ");
        assert_eq!(steps.len(), 3);
    }

    #[test]
    fn blank_text_has_no_steps() {
        assert!(split_steps("  ").is_empty());
    }
}

//! Small helpers shared by the entity handlers.

/// Escape LIKE wildcards (% and _) in a search string
pub fn escape_like_wildcards(s: &str) -> String {
    s.replace('%', "\\%").replace('_', "\\_")
}

/// Generate a URL-friendly slug from a title
///
/// Lowercases, replaces every non-alphanumeric run with a single dash,
/// and trims leading/trailing dashes.
pub fn slugify(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' {
                c
            }
            else {
                '-'
            }
        })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_simple() {
        assert_eq!(slugify("Consulting"), "consulting");
    }

    #[test]
    fn test_slugify_with_spaces() {
        assert_eq!(slugify("Growth Strategy Playbook"), "growth-strategy-playbook");
    }

    #[test]
    fn test_slugify_with_special_chars() {
        assert_eq!(slugify("Q3 Results! @#$ 2026"), "q3-results-2026");
    }

    #[test]
    fn test_slugify_consecutive_dashes() {
        assert_eq!(slugify("Scaling---Operations"), "scaling-operations");
    }

    #[test]
    fn test_slugify_leading_trailing_dashes() {
        assert_eq!(slugify(" Scaling Operations "), "scaling-operations");
    }

    #[test]
    fn test_slugify_already_slugified() {
        assert_eq!(slugify("case-study"), "case-study");
    }

    #[test]
    fn test_escape_like_wildcards() {
        assert_eq!(escape_like_wildcards("50%_done"), "50\\%\\_done");
        assert_eq!(escape_like_wildcards("plain"), "plain");
    }
}

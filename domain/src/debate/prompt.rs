//! Prompt rewrite between debate rounds.

use crate::core::response::Response;

/// Maximum preview length (in bytes) of each argument in the digest.
pub const PREVIEW_LEN: usize = 200;

/// Build the next round's prompt from the original prompt and the
/// arguments of the round that just finished.
///
/// # Example
///
/// ```
/// use orchestra_domain::{Response, augment_prompt};
///
/// let prompt = augment_prompt(
///     "Which database?",
///     &[Response::new("openai", "Postgres"), Response::new("anthropic", "SQLite")],
/// );
/// assert!(prompt.starts_with("Which database?"));
/// assert!(prompt.contains("- openai: Postgres"));
/// assert!(prompt.contains("- anthropic: SQLite"));
/// ```
pub fn augment_prompt(original: &str, previous_round: &[Response]) -> String {
    let mut prompt = String::from(original);
    prompt.push_str("\n\nPrevious round responses:\n");
    for argument in previous_round {
        prompt.push_str(&format!(
            "- {}: {}\n",
            argument.provider,
            preview(&argument.content, PREVIEW_LEN)
        ));
    }
    prompt.push_str(
        "\nConsider the other viewpoints above and provide your refined answer.",
    );
    prompt
}

/// Cut `text` to at most `max_len` bytes on a char boundary, marking the cut.
fn preview(text: &str, max_len: usize) -> String {
    let text = text.trim();
    if text.len() <= max_len {
        return text.to_string();
    }
    let mut end = max_len;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &text[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_every_argument() {
        let prompt = augment_prompt(
            "Q",
            &[Response::new("a", "first"), Response::new("b", "second")],
        );
        assert!(prompt.contains("- a: first\n"));
        assert!(prompt.contains("- b: second\n"));
        assert!(prompt.ends_with("provide your refined answer."));
    }

    #[test]
    fn test_long_arguments_are_truncated() {
        let long = "x".repeat(PREVIEW_LEN + 50);
        let prompt = augment_prompt("Q", &[Response::new("a", long)]);
        let expected = format!("- a: {}...", "x".repeat(PREVIEW_LEN));
        assert!(prompt.contains(&expected));
    }

    #[test]
    fn test_preview_respects_char_boundaries() {
        let text = "é".repeat(150); // 300 bytes
        let cut = preview(&text, PREVIEW_LEN);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.len(), PREVIEW_LEN + 3);
    }

    #[test]
    fn test_original_prompt_is_kept_verbatim() {
        let prompt = augment_prompt("Keep   me", &[]);
        assert!(prompt.starts_with("Keep   me\n\n"));
    }
}

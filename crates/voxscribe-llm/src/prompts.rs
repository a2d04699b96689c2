//! Prompt templates for title generation

/// Content beyond this is cut from the prompt; titles only need the lede.
const MAX_CONTENT_CHARS: usize = 1000;

/// System prompt steering the model toward a plain newline-separated list
pub const TITLE_SYSTEM_PROMPT: &str = "You are an expert copywriter who creates viral blog titles. \
Create exactly 3 engaging titles. Return each title on a new line without quotes or numbering. \
Example format:\nFirst Amazing Title Here\nSecond Amazing Title Here\nThird Amazing Title Here";

/// Build the user prompt from blog content, truncated to the lede
pub fn build_title_prompt(content: &str) -> String {
    let excerpt: String = content.chars().take(MAX_CONTENT_CHARS).collect();
    format!(
        "Create 3 amazing titles for this blog post:\n\nContent: {}",
        excerpt
    )
}

/// Parse the model's reply into individual titles, dropping blank lines
/// and any stray numbering or quoting the model added anyway.
pub fn parse_titles(response: &str) -> Vec<String> {
    response
        .lines()
        .map(|line| {
            line.trim()
                .trim_start_matches(|c: char| c.is_ascii_digit() || c == '.' || c == ')' || c == '-')
                .trim()
                .trim_matches('"')
                .to_string()
        })
        .filter(|line| !line.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_title_prompt_truncates() {
        let long_content = "x".repeat(5000);
        let prompt = build_title_prompt(&long_content);
        assert!(prompt.len() < 1200);
        assert!(prompt.contains("Create 3 amazing titles"));
    }

    #[test]
    fn test_parse_titles_plain() {
        let titles = parse_titles("First Title\nSecond Title\n\nThird Title\n");
        assert_eq!(titles, vec!["First Title", "Second Title", "Third Title"]);
    }

    #[test]
    fn test_parse_titles_strips_numbering_and_quotes() {
        let titles = parse_titles("1. \"Why Rust Wins\"\n2) The Borrow Checker\n- A Third One");
        assert_eq!(
            titles,
            vec!["Why Rust Wins", "The Borrow Checker", "A Third One"]
        );
    }
}

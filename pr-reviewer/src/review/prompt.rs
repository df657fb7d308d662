//! Prompt template for review suggestions.
//!
//! The code block is embedded verbatim; an empty block is still sent.

/// Builds the review prompt for `language` around `code`.
pub fn build_review_prompt(language: &str, code: &str) -> String {
    let mut s = String::new();
    s.push_str(&format!(
        "You are a code quality assistant. Please review the following {language} code and provide suggestions for improvements, including:\n"
    ));
    s.push_str("- Fixing any syntax or indentation errors\n");
    s.push_str(&format!(
        "- Suggesting improvements in code style, according to {language}'s established style guidelines\n"
    ));
    s.push_str("- Identifying any security vulnerabilities or unsafe practices\n");
    s.push_str("\nHere is the code:\n");
    s.push_str(code);
    s.push_str("\n\nPlease provide specific suggestions for fixing any issues you find.\n");
    s
}

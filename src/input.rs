//! Tokenizing of raw REPL input lines

/// Splits `text` on whitespace and lowercases every word
pub fn clean_input(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}

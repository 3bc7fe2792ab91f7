use std::sync::LazyLock;

use regex::Regex;

static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\p{L}\p{N}]+(?:['’\-][\p{L}\p{N}]+)*").unwrap_or_else(|e| {
        unreachable!("token pattern is a valid regex: {}", e)
    })
});

/// A word of the input with its `[start, end)` character offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub start: usize,
    pub end: usize,
}

/// Splits `text` into words, reporting character (not byte) offsets.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars_seen = 0;
    let mut bytes_seen = 0;

    for found in TOKEN.find_iter(text) {
        chars_seen += text[bytes_seen..found.start()].chars().count();
        let start = chars_seen;
        chars_seen += found.as_str().chars().count();
        bytes_seen = found.end();

        tokens.push(Token {
            text: found.as_str().to_string(),
            start,
            end: chars_seen,
        });
    }

    tokens
}

/// Lower-cased, singular form used for every lexicon and weight lookup.
pub fn normalize(word: &str) -> String {
    let word = word.to_lowercase();
    let length = word.chars().count();

    if length > 4 && word.ends_with("ies") {
        format!("{}y", &word[..word.len() - 3])
    } else if length > 4
        && (word.ends_with("oes") || word.ends_with("ches") || word.ends_with("shes"))
    {
        word[..word.len() - 2].to_string()
    } else if length > 3 && word.ends_with('s') && !word.ends_with("ss") && !word.ends_with("us") {
        word[..word.len() - 1].to_string()
    } else {
        word
    }
}

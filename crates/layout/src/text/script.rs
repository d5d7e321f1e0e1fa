//! Script detection for line breaking.
//!
//! CJK text has no spaces between words, so any token containing a CJK
//! character is broken into single characters, each its own break
//! opportunity.

/// Hiragana/Katakana, CJK Ext-A, CJK Unified, CJK Compatibility, Halfwidth
/// Katakana, and the Hangul block range.
pub fn is_cjk_char(c: char) -> bool {
    matches!(
        c,
        '\u{3040}'..='\u{30FF}'
            | '\u{3400}'..='\u{4DBF}'
            | '\u{4E00}'..='\u{9FFF}'
            | '\u{F900}'..='\u{FAFF}'
            | '\u{FF66}'..='\u{FF9F}'
            | '\u{3131}'..='\u{D79D}'
    )
}

/// True if any character of `token` is CJK.
pub fn is_cjk(token: &str) -> bool {
    token.chars().any(is_cjk_char)
}

/// Splits on ASCII spaces, then expands CJK-bearing tokens into one token
/// per character. Empty tokens from repeated spaces are kept.
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    for word in text.split(' ') {
        if is_cjk(word) {
            tokens.extend(word.chars().map(String::from));
        } else {
            tokens.push(word.to_string());
        }
    }
    tokens
}

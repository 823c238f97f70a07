//! Word and emoji extraction from message text.

use std::sync::LazyLock;

use regex::Regex;

static WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\p{L}\p{N}]+").expect("word pattern is valid"));

static EMOJI_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\p{Extended_Pictographic}").expect("emoji pattern is valid"));

/// Lowercased words (runs of letters and digits).
pub fn words(text: &str) -> impl Iterator<Item = String> + '_ {
    WORD_RE.find_iter(text).map(|m| m.as_str().to_lowercase())
}

/// Pictographic emoji, one item per code point.
///
/// Joiners and variation selectors are not pictographic and are dropped, so
/// `❤️` counts as `❤` and a ZWJ sequence counts once per component.
pub fn emojis(text: &str) -> impl Iterator<Item = &str> {
    EMOJI_RE.find_iter(text).map(|m| m.as_str())
}

/// Lowercased first word of a display name, used to detect name mentions.
pub fn first_name(name: &str) -> Option<String> {
    words(name).next()
}

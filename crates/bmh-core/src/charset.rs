//! Ordered character sets.

use serde::{Deserialize, Serialize};

/// Printable ASCII, space through tilde.
pub const ASCII: &str = " !\"#$%&'()*+,-./0123456789:;<=>?@ABCDEFGHIJKLMNOPQRSTUVWXYZ[\\]^_`abcdefghijklmnopqrstuvwxyz{|}~";

/// Punctuation and digits only, space through `@`.
pub const LOWER_ASCII: &str = " !\"#$%&'()*+,-./0123456789:;<=>?@";

/// Digits and the colon, enough for clocks and counters.
pub const DIGITS: &str = "0123456789:";

/// An ordered list of characters without repeats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct CharacterSet {
    chars: Vec<char>,
}

impl CharacterSet {
    /// Build from any characters, keeping the first occurrence of each.
    pub fn from_chars(chars: impl IntoIterator<Item = char>) -> Self {
        let mut out: Vec<char> = Vec::new();
        for c in chars {
            if !out.contains(&c) {
                out.push(c);
            }
        }
        Self { chars: out }
    }

    /// Build from the contents of a character file. Line breaks are ignored.
    pub fn from_file_contents(contents: &str) -> Self {
        Self::from_chars(contents.chars().filter(|&c| c != '\n' && c != '\r'))
    }

    /// Printable ASCII.
    pub fn ascii() -> Self {
        Self::from_chars(ASCII.chars())
    }

    /// Space through `@`.
    pub fn lower_ascii() -> Self {
        Self::from_chars(LOWER_ASCII.chars())
    }

    /// `0123456789:`.
    pub fn digits() -> Self {
        Self::from_chars(DIGITS.chars())
    }

    /// Characters in order.
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Code points in order.
    pub fn codepoints(&self) -> Vec<u32> {
        self.chars.iter().map(|&c| c as u32).collect()
    }

    /// Number of characters.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// The characters as one string.
    pub fn as_line(&self) -> String {
        self.chars.iter().collect()
    }
}

impl Default for CharacterSet {
    fn default() -> Self {
        Self::digits()
    }
}

impl From<&str> for CharacterSet {
    fn from(s: &str) -> Self {
        Self::from_chars(s.chars())
    }
}

impl From<String> for CharacterSet {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<CharacterSet> for String {
    fn from(set: CharacterSet) -> Self {
        set.as_line()
    }
}

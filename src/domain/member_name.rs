use std::collections::HashSet;

use unicode_segmentation::UnicodeSegmentation;

/// A member's display name. Rejects empty/whitespace names, enforces a maximum
/// length, and rejects characters that would break the rendered invitation.
///
/// Must be instantiated with `MemberName::parse`; the value is stored trimmed.
#[derive(Debug, Clone)]
pub struct MemberName(String);

impl MemberName {
    pub fn parse(name: String) -> Result<Self, String> {
        let name = name.trim();
        let empty = name.is_empty();
        let too_long = name.graphemes(true).count() > 256;
        let bad_chars: HashSet<char> = r#""<>\{}"#.chars().collect();
        let bad = name.chars().any(|c| bad_chars.contains(&c) || c.is_control());
        match !empty && !too_long && !bad {
            true => Ok(Self(name.to_string())),
            false => Err(format!("Invalid name: {name:?}")),
        }
    }
}

impl AsRef<str> for MemberName {
    fn as_ref(&self) -> &str { &self.0 }
}

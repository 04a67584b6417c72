use validator::ValidateEmail;

/// Trimmed, lowercased form of an email address. This is the key that
/// uniqueness is checked against, so every write path must go through it.
pub fn normalize_email(raw: &str) -> String { raw.trim().to_lowercase() }

#[derive(Debug, Clone, PartialEq, Eq)]
/// A normalized, syntactically valid email address. Used both for member
/// records and for the sender of outgoing invitations.
pub struct MemberEmail(String);

impl MemberEmail {
    pub fn parse(email: String) -> Result<Self, String> {
        let email = normalize_email(&email);
        ValidateEmail::validate_email(&email)
            .then_some(Self(email.clone()))
            .ok_or(format!("Invalid email: {email:?}"))
    }
}

impl AsRef<str> for MemberEmail {
    fn as_ref(&self) -> &str { &self.0 }
}

impl std::fmt::Display for MemberEmail {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

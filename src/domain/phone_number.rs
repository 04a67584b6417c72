/// Contact number as entered by a member or read from a spreadsheet. Formats
/// vary too much between states to be strict, so only the character set is
/// checked.
#[derive(Debug, Clone)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn parse(number: String) -> Result<Self, String> {
        let number = number.trim();
        let allowed = number
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_whitespace() || "+-().".contains(c));
        let has_digit = number.chars().any(|c| c.is_ascii_digit());
        match allowed && has_digit && number.chars().count() <= 32 {
            true => Ok(Self(number.to_string())),
            false => Err(format!("Invalid phone number: {number:?}")),
        }
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str { &self.0 }
}

use std::fmt::Display;

use serde::Deserialize;

use super::MemberEmail;
use super::MemberName;
use super::Message;
use super::PhoneNumber;

/// Unvalidated member fields, as received by `POST /members/new` or assembled
/// from a spreadsheet row. Every field is optional on the wire; a missing
/// `name` is reported by validation rather than by deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MemberDraft {
    pub name: String,
    pub email: Option<String>,
    pub state: String,
    pub number: String,
    pub field: String,
    pub licensed_by: String,
    pub license_number: String,
    pub message: Message,
    #[serde(rename = "email_sent")]
    pub email_sent: bool,
}

/// A member that has passed validation and can be inserted.
#[derive(Debug, Clone)]
pub struct NewMember {
    pub name: MemberName,
    pub email: Option<MemberEmail>,
    pub state: String,
    pub number: Option<PhoneNumber>,
    pub field: String,
    pub licensed_by: String,
    pub license_number: String,
    pub message: Message,
    pub email_sent: bool,
}

/// Every field that failed validation, in field order.
#[derive(Debug, PartialEq, Eq)]
pub struct ValidationError {
    pub errors: Vec<String>,
}

impl Display for ValidationError {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "{}", self.errors.join("; "))
    }
}

impl std::error::Error for ValidationError {}

impl TryFrom<MemberDraft> for NewMember {
    type Error = ValidationError;
    fn try_from(value: MemberDraft) -> Result<Self, Self::Error> {
        let mut errors = vec![];

        let name = MemberName::parse(value.name).map_err(|e| errors.push(e)).ok();

        // blank optional fields are simply absent
        let email = value
            .email
            .filter(|e| !e.trim().is_empty())
            .map(MemberEmail::parse)
            .transpose()
            .map_err(|e| errors.push(e))
            .ok()
            .flatten();

        let number = Some(value.number)
            .filter(|n| !n.trim().is_empty())
            .map(PhoneNumber::parse)
            .transpose()
            .map_err(|e| errors.push(e))
            .ok()
            .flatten();

        match name {
            Some(name) if errors.is_empty() => Ok(NewMember {
                name,
                email,
                state: value.state.trim().to_string(),
                number,
                field: value.field.trim().to_string(),
                licensed_by: value.licensed_by.trim().to_string(),
                license_number: value.license_number.trim().to_string(),
                message: value.message,
                email_sent: value.email_sent,
            }),
            _ => Err(ValidationError { errors }),
        }
    }
}

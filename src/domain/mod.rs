mod member;
mod member_email;
mod member_name;
mod new_member;
mod phone_number;
// allow external `use` statements to skip `member_email` etc
pub use member::Member;
pub use member::Message;
pub use member_email::normalize_email;
pub use member_email::MemberEmail;
pub use member_name::MemberName;
pub use new_member::MemberDraft;
pub use new_member::NewMember;
pub use new_member::ValidationError;
pub use phone_number::PhoneNumber;

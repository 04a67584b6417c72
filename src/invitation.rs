//! The fixed invitation sent to prospective panel members.

use crate::domain::Message;

pub const INVITATION_SUBJECT: &str = "Invitation to conduct dispute resolution cases";

/// Used for the copy stored on imported members, before a name-specific
/// invitation has been sent
const GENERIC_SALUTATION: &str = "Colleague";

const LETTER: &str = "Dear {first_name},

Re: Invitation to conduct dispute resolution cases

I would like to introduce myself and our Company to you, in the hope that we can be of mutual benefit to each other.

We are a new and unique company in the dispute resolution industry. We are an aggregator of dispute cases. We intend to heavily advertise and market our services (mediation, conciliation, arbitration, facilitation and commercial negotiations) and distribute the work received to our ‘Panel’ of accredited dispute professionals such as yourself.

We are looking for experienced and currently accredited Mediators, Conciliators, Arbitrators and Negotiators to join our Panel.

How it Works
• If you are qualified – join - via our website. www.disputesresolutions.com  (free and no obligation)
• If you qualify you will become a member of our panel
• You will have access to the ‘Jobs Schedule’ on the website, where we post all available jobs. We also notify you of new jobs by email.
• If you see a job that you would like to do and is a suitable date for you, simply click on ‘Book’, the job will be assigned to you.
• We will send you the ‘Intake’ information and relevant documents, as well as a summary.
• Prior to the date of the scheduled job, you will be paid in full.
• Payment to you is $900 for standard half-day (up to 4 hrs) and $1500 for a standard full day (up to 8 hrs)
• All jobs are conducted on-line via Zoom.
• There are no obligations as to how many jobs you do or which jobs you select. You are an independent contractor not an employee of the company.

Note:
(a) You have no requirement to do any intake work. A summary, plus necessary information and documents will be sent to you.
(b) You must not ‘Book’ a job unless you are sure you are available on that date and are able to do the job. No cancellations accepted (except for emergencies).

More information about our company and our services can be seen at our website www.disputesresolutions.com. To join or view our Panel details, scroll to the bottom of the Home-page on the website and see ‘Panel Members – Join’.

I would be happy to answer any further questions you might have by phone or email.

Sincerely,

Robert Oayda
";

const SIGNATURE_HTML: &str = r#"<span style="color: #6e6e6e;">(Accredited Mediator)</span>
<span style="color: #6e6e6e;">Founder, CEO</span>

<img src="https://disputesresolutions.com/wp-content/uploads/2024/05/DR-Logo-removebg-preview-1.png" alt="Robert Oayda" width="100" height="100">

<span style="color: #6e6e6e;">Phone:&nbsp;&nbsp;&nbsp;&nbsp;+61 418 220 263</span>
<span style="color: #6e6e6e;">Email:</span>&nbsp;&nbsp;&nbsp;&nbsp;<span style="color: #2c66dd;">robert@oayda.com</span>
<span style="color: #6e6e6e;">Website:</span>&nbsp;&nbsp;&nbsp;&nbsp;<span style="color: #2c66dd;"><a href="https://disputesresolutions.com">www.disputesresolutions.com</a></span>"#;

const SIGNATURE_TEXT: &str = "(Accredited Mediator)
Founder, CEO

Phone:   +61 418 220 263
Email:   robert@oayda.com
Website: www.disputesresolutions.com";

/// First whitespace-separated token of a full name; empty if there is none.
pub fn first_name(full_name: &str) -> &str { full_name.split_whitespace().next().unwrap_or_default() }

/// An invitation addressed to one person.
pub struct Invitation {
    first_name: String,
}

impl Invitation {
    /// Address the invitation to the first token of `full_name`
    pub fn for_name(full_name: &str) -> Self {
        Self {
            first_name: first_name(full_name).to_string(),
        }
    }

    /// The unaddressed invitation, identical for every member
    pub fn generic() -> Self {
        Self {
            first_name: GENERIC_SALUTATION.to_string(),
        }
    }

    pub fn subject(&self) -> &'static str { INVITATION_SUBJECT }

    /// Letter plus HTML signature, still newline-separated. This is the form
    /// kept on the member record.
    pub fn body(&self) -> String {
        let name = htmlescape::encode_minimal(&self.first_name);
        format!("{}{SIGNATURE_HTML}", LETTER.replace("{first_name}", &name))
    }

    /// `body`, with newlines converted to line breaks
    pub fn html_body(&self) -> String { self.body().replace('\n', "<br>") }

    pub fn text_body(&self) -> String {
        format!(
            "{}{SIGNATURE_TEXT}",
            LETTER.replace("{first_name}", &self.first_name)
        )
    }

    pub fn message(&self) -> Message {
        Message {
            subject: INVITATION_SUBJECT.to_string(),
            body: self.body(),
        }
    }
}

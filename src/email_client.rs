use std::time::Duration;

use reqwest::Client;
use secrecy::ExposeSecret;
use secrecy::Secret;
use serde::Serialize;

use crate::domain::MemberEmail;

/// Client for a Postmark-compatible mail API.
///
/// Establishing a HTTP connection is expensive, so a single client is built at
/// startup and shared (via `web::Data`) by every handler.
pub struct EmailClient {
    http_client: Client,
    base_url: String,
    sender: MemberEmail,
    authorization_token: Secret<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html_body: &'a str,
    text_body: &'a str,
}

impl EmailClient {
    /// `timeout` applies to each send
    pub fn new(
        base_url: String,
        sender: MemberEmail,
        authorization_token: Secret<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            base_url,
            sender,
            authorization_token,
        })
    }

    /// Any non-2xx response from the API is an error
    pub async fn send_email(
        &self,
        recipient: &MemberEmail,
        subject: &str,
        html_content: &str,
        text_content: &str,
    ) -> Result<(), reqwest::Error> {
        let url = format!("{}/email", self.base_url);
        let body = SendEmailRequest {
            from: self.sender.as_ref(),
            to: recipient.as_ref(),
            subject,
            html_body: html_content,
            text_body: text_content,
        };
        self.http_client
            .post(&url)
            .header(
                "X-Postmark-Server-Token",
                self.authorization_token.expose_secret(),
            )
            .json(&body)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

pub mod template;

use std::collections::HashMap;

use serde::{
    Deserialize,
    Serialize,
};

use crate::core::BunpoError;

const API_URL: &str = "https://api.resend.com/emails";
const API_KEY_ENV: &str = "RESEND_API_KEY";
const FROM_ADMIN: &str = "Bunpo100 <admin@bunpo100.app>";

#[derive(Debug, Clone, Default)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub text: Option<String>,
    pub html: Option<String>,
    pub reply_to: Option<String>,
}

#[derive(Serialize)]
struct OutboundEmail<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    html: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
}

#[derive(Deserialize)]
struct SendResponse {
    id: String,
}

/// Values usable in email templates. Lists render as `<li>` items so a
/// template can drop them straight into a `<ul>`.
#[derive(Debug, Clone)]
pub enum TemplateValue {
    Text(String),
    List(Vec<String>),
    Number(i64),
}

impl TemplateValue {
    fn render(&self) -> String {
        match self {
            TemplateValue::Text(text) => text.clone(),
            TemplateValue::List(items) => items
                .iter()
                .map(|item| format!("<li>{}</li>", item))
                .collect::<Vec<_>>()
                .join("\n"),
            TemplateValue::Number(number) => number.to_string(),
        }
    }
}

/// Transactional email client for the Resend HTTP API. Without an API key
/// every send is mocked as a success so development machines never fail on
/// missing credentials.
#[derive(Clone)]
pub struct EmailClient {
    api_key: Option<String>,
    http: reqwest::blocking::Client,
}

impl EmailClient {
    pub fn from_env() -> Self {
        let api_key = std::env::var(API_KEY_ENV).ok().filter(|key| !key.is_empty());
        if api_key.is_none() {
            eprintln!("{} is not set. Email sends will be mocked.", API_KEY_ENV);
        }
        Self::with_key(api_key)
    }

    pub fn with_key(api_key: Option<String>) -> Self {
        Self { api_key, http: reqwest::blocking::Client::new() }
    }

    pub fn is_mocked(&self) -> bool {
        self.api_key.is_none()
    }

    /// Sends one message, returning the provider's message id. Provider
    /// errors collapse to a generic send failure for the caller to surface.
    pub fn send(&self, message: &EmailMessage) -> Result<String, BunpoError> {
        let Some(api_key) = &self.api_key else {
            println!("Email service not configured. Skipping send to {}.", message.to);
            return Ok("mock-email-id".to_string());
        };

        let payload = OutboundEmail {
            from: FROM_ADMIN,
            to: [message.to.as_str()],
            subject: &message.subject,
            text: message.text.as_deref(),
            html: message.html.as_deref(),
            reply_to: message.reply_to.as_deref(),
        };

        let response = self.http.post(API_URL).bearer_auth(api_key).json(&payload).send()?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            eprintln!("Error sending email ({}): {}", status, body);
            return Err(BunpoError::EmailSend);
        }

        let parsed: SendResponse = response.json()?;
        Ok(parsed.id)
    }

    /// Renders a stored HTML template with `{{variable}}` substitution and
    /// sends the result.
    pub fn send_templated(
        &self,
        to: &str,
        subject: &str,
        template_name: &str,
        reply_to: &str,
        variables: &HashMap<String, TemplateValue>,
    ) -> Result<String, BunpoError> {
        if self.is_mocked() {
            println!("Email service not configured. Skipping send to {}.", to);
            return Ok("mock-email-id".to_string());
        }

        let raw = template::load_template(template_name)?;

        let rendered: HashMap<String, String> = variables
            .iter()
            .map(|(key, value)| (key.clone(), value.render()))
            .collect();

        let html = template::replace_variables(&raw, &rendered);

        self.send(&EmailMessage {
            to: to.to_string(),
            subject: subject.to_string(),
            html: Some(html),
            reply_to: Some(reply_to.to_string()),
            ..EmailMessage::default()
        })
    }
}

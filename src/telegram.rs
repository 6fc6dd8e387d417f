use std::fmt;

use serde::Deserialize;
use serde_json::json;

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Error raised when the Telegram API declines a request
#[derive(Debug)]
pub struct TelegramError {
    description: String,
}

impl fmt::Display for TelegramError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Telegram API error: {}", self.description)
    }
}

impl std::error::Error for TelegramError {}

/// Relevant slice of the Telegram API response envelope
#[derive(Debug, Deserialize)]
pub struct SendMessageResponse {
    pub ok: bool,
    #[serde(default)]
    pub description: Option<String>,
}

/// Thin facade over the Telegram bot API
///
/// Delivers a formatted HTML message to one fixed chat. Auth and network
/// failures propagate to the caller; there are no retries.
pub struct TelegramNotifier {
    token: String,
    chat_id: String,
    client: reqwest::Client,
}

impl TelegramNotifier {
    pub fn new(token: String, chat_id: String) -> Self {
        Self {
            token,
            chat_id,
            client: reqwest::Client::new(),
        }
    }

    /// Send an HTML-formatted message to the configured chat
    pub async fn send_message(
        &self,
        text: &str,
    ) -> Result<SendMessageResponse, crate::models::Error> {
        let url = send_message_url(TELEGRAM_API_BASE, &self.token);
        let body = json!({
            "chat_id": self.chat_id,
            "text": text,
            "parse_mode": "HTML",
        });

        let response: SendMessageResponse = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if !response.ok {
            return Err(Box::new(TelegramError {
                description: response
                    .description
                    .unwrap_or_else(|| "no description".into()),
            }));
        }

        Ok(response)
    }
}

fn send_message_url(base: &str, token: &str) -> String {
    format!("{}/bot{}/sendMessage", base, token)
}

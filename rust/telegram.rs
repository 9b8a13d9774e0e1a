use async_trait::async_trait;
use serde::Serialize;

use crate::config::Config;
use crate::error::PollError;

const TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// `sendMessage` rejects texts longer than this many characters.
const TELEGRAM_MESSAGE_LIMIT: usize = 4096;

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, text: &str) -> Result<(), PollError>;
}

pub struct TelegramNotifier {
    http: reqwest::Client,
    api_url: String,
    token: String,
    chat_id: String,
}

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
}

impl TelegramNotifier {
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()?;
        Ok(Self {
            http,
            api_url: TELEGRAM_API_URL.to_string(),
            token: config.telegram_token.clone(),
            chat_id: config.telegram_chat_id.clone(),
        })
    }

    fn send_message_url(&self) -> String {
        format!("{}/bot{}/sendMessage", self.api_url, self.token)
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(&self, text: &str) -> Result<(), PollError> {
        tracing::debug!("Sending Telegram message");

        let text = truncate_message(text, TELEGRAM_MESSAGE_LIMIT);
        let payload = SendMessage {
            chat_id: &self.chat_id,
            text: &text,
        };

        // reqwest errors embed the URL, which contains the bot token.
        let resp = self
            .http
            .post(self.send_message_url())
            .json(&payload)
            .send()
            .await
            .map_err(|err| PollError::delivery(err.without_url().to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(PollError::delivery(format!(
                "Telegram API error: {} - {}",
                status, body
            )));
        }

        tracing::info!(chat_id = %self.chat_id, "Telegram message sent");
        Ok(())
    }
}

fn truncate_message(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let truncated: String = text.chars().take(limit - 1).collect();
    format!("{}…", truncated)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notifier() -> TelegramNotifier {
        let config = Config::from_lookup(|name| match name {
            "PRACTICUM_TOKEN" => Some("p".to_string()),
            "TELEGRAM_TOKEN" => Some("123:abc".to_string()),
            "TELEGRAM_CHAT_ID" => Some("-100500".to_string()),
            _ => None,
        })
        .unwrap();
        TelegramNotifier::new(&config).unwrap()
    }

    #[test]
    fn test_send_message_url() {
        assert_eq!(
            notifier().send_message_url(),
            "https://api.telegram.org/bot123:abc/sendMessage"
        );
    }

    #[test]
    fn test_payload_shape() {
        let payload = SendMessage {
            chat_id: "-100500",
            text: "hello",
        };
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            serde_json::json!({"chat_id": "-100500", "text": "hello"})
        );
    }

    #[test]
    fn test_short_message_untouched() {
        assert_eq!(truncate_message("Работа проверена", 4096), "Работа проверена");
    }

    #[test]
    fn test_long_message_truncated_on_char_boundary() {
        let long = "ж".repeat(5000);
        let truncated = truncate_message(&long, TELEGRAM_MESSAGE_LIMIT);
        assert_eq!(truncated.chars().count(), TELEGRAM_MESSAGE_LIMIT);
        assert!(truncated.ends_with('…'));
    }

    #[tokio::test]
    async fn test_send_failure_is_delivery_error_without_token() {
        let mut notifier = notifier();
        notifier.api_url = "not a url".to_string();
        let err = notifier.notify("hello").await.unwrap_err();
        match err {
            PollError::Delivery(cause) => assert!(!cause.contains("123:abc"), "token leaked: {}", cause),
            other => panic!("expected delivery error, got {:?}", other),
        }
    }
}

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::StatusCode;

use crate::config::Config;
use crate::error::PollError;
use crate::models::RawResponse;

#[async_trait]
pub trait HomeworkApi: Send + Sync {
    /// Returns the raw body of the statuses that changed since `from_date`.
    async fn fetch(&self, from_date: i64) -> Result<RawResponse, PollError>;
}

#[derive(Clone)]
pub struct PracticumClient {
    http: reqwest::Client,
    endpoint: String,
    token: String,
}

impl PracticumClient {
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()?;
        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            token: config.practicum_token.clone(),
        })
    }

    fn build_request(&self, from_date: i64) -> Result<reqwest::Request, reqwest::Error> {
        self.http
            .get(&self.endpoint)
            .header(AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .build()
    }
}

#[async_trait]
impl HomeworkApi for PracticumClient {
    async fn fetch(&self, from_date: i64) -> Result<RawResponse, PollError> {
        tracing::debug!(endpoint = %self.endpoint, from_date, "Requesting homework statuses");

        let request = self
            .build_request(from_date)
            .map_err(|err| PollError::transport(format!("invalid request: {}", err)))?;
        let resp = self
            .http
            .execute(request)
            .await
            .map_err(|err| PollError::transport(err.to_string()))?;

        let status = resp.status();
        if status != StatusCode::OK {
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), body = %body, "Homework API returned an error status");
            return Err(PollError::RemoteStatus(status.as_u16()));
        }

        let body = resp
            .json::<RawResponse>()
            .await
            .map_err(|err| PollError::transport(format!("response body is not JSON: {}", err)))?;

        tracing::debug!("Homework statuses received");
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(endpoint: &str) -> PracticumClient {
        let config = Config::from_lookup(|name| match name {
            "PRACTICUM_TOKEN" => Some("y0_token".to_string()),
            "TELEGRAM_TOKEN" => Some("bot".to_string()),
            "TELEGRAM_CHAT_ID" => Some("1".to_string()),
            "PRACTICUM_ENDPOINT" => Some(endpoint.to_string()),
            _ => None,
        })
        .unwrap();
        PracticumClient::new(&config).unwrap()
    }

    #[test]
    fn test_request_carries_auth_and_cursor() {
        let client = client("https://practicum.yandex.ru/api/user_api/homework_statuses/");
        let request = client.build_request(1_549_962_000).unwrap();

        assert_eq!(request.method(), reqwest::Method::GET);
        assert_eq!(
            request.url().as_str(),
            "https://practicum.yandex.ru/api/user_api/homework_statuses/?from_date=1549962000"
        );
        assert_eq!(
            request.headers().get(AUTHORIZATION).unwrap(),
            "OAuth y0_token"
        );
    }

    #[tokio::test]
    async fn test_bad_endpoint_is_transport_error() {
        let client = client("not a url");
        let err = client.fetch(0).await.unwrap_err();
        match err {
            PollError::Transport(cause) => assert!(cause.starts_with("invalid request"), "{}", cause),
            other => panic!("expected transport error, got {:?}", other),
        }
    }
}

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PollError {
    #[error("request to the homework API failed: {0}")]
    Transport(String),

    #[error("homework API returned status {0}, expected 200")]
    RemoteStatus(u16),

    #[error("unexpected API response: {0}")]
    Shape(String),

    #[error("homework entry is missing the \"{0}\" field")]
    MissingField(&'static str),

    #[error("unexpected homework status \"{0}\"")]
    UnknownStatus(String),

    #[error("failed to deliver message: {0}")]
    Delivery(String),
}

impl PollError {
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    pub fn shape(msg: impl Into<String>) -> Self {
        Self::Shape(msg.into())
    }

    pub fn delivery(msg: impl Into<String>) -> Self {
        Self::Delivery(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_carries_cause() {
        let err = PollError::transport("connection refused");
        assert_eq!(
            err.to_string(),
            "request to the homework API failed: connection refused"
        );
        assert_eq!(
            PollError::RemoteStatus(503).to_string(),
            "homework API returned status 503, expected 200"
        );
        assert_eq!(
            PollError::MissingField("homework_name").to_string(),
            "homework entry is missing the \"homework_name\" field"
        );
    }
}

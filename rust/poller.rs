use std::time::Duration;

use crate::error::PollError;
use crate::parse::{extract, validate};
use crate::practicum::HomeworkApi;
use crate::telegram::Notifier;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    NoUpdates,
    Notified,
    /// Same text as the last delivered message, nothing sent.
    Suppressed,
    FailureReported,
    FailureSuppressed,
    /// The cycle failed and the report about it could not be delivered either.
    ReportFailed,
}

/// Only the first (most recent) homework of each response is reported.
pub struct Poller<A, N> {
    api: A,
    notifier: N,
    interval: Duration,
    cursor: i64,
    last_message: Option<String>,
}

impl<A, N> Poller<A, N>
where
    A: HomeworkApi,
    N: Notifier,
{
    pub fn new(api: A, notifier: N, interval: Duration, start_cursor: i64) -> Self {
        Self {
            api,
            notifier,
            interval,
            cursor: start_cursor,
            last_message: None,
        }
    }

    pub async fn run(mut self) {
        tracing::info!(
            cursor = self.cursor,
            interval_secs = self.interval.as_secs(),
            "Starting poll loop"
        );
        loop {
            let outcome = self.poll_once().await;
            tracing::debug!(?outcome, cursor = self.cursor, "Poll cycle finished");
            tokio::time::sleep(self.interval).await;
        }
    }

    /// One fetch-validate-notify pass. Never fails: errors are turned into a
    /// `Program failure` message and reported through the notifier.
    pub async fn poll_once(&mut self) -> CycleOutcome {
        let err = match self.check_statuses().await {
            Ok(outcome) => return outcome,
            Err(err) => err,
        };

        let message = format!("Program failure: {}", err);
        tracing::error!(error = %err, "Poll cycle failed");

        match self.send_if_changed(message).await {
            Ok(true) => CycleOutcome::FailureReported,
            Ok(false) => CycleOutcome::FailureSuppressed,
            Err(send_err) => {
                tracing::error!(error = %send_err, "Could not report the failure to the chat");
                CycleOutcome::ReportFailed
            }
        }
    }

    async fn check_statuses(&mut self) -> Result<CycleOutcome, PollError> {
        let raw = self.api.fetch(self.cursor).await?;
        let response = validate(raw)?;

        let outcome = match response.latest() {
            None => {
                tracing::debug!("No new homework statuses");
                CycleOutcome::NoUpdates
            }
            Some(entry) => {
                if response.homeworks.len() > 1 {
                    tracing::debug!(
                        skipped = response.homeworks.len() - 1,
                        "Reporting only the most recent homework"
                    );
                }
                let message = extract(entry)?;
                if self.send_if_changed(message).await? {
                    CycleOutcome::Notified
                } else {
                    CycleOutcome::Suppressed
                }
            }
        };

        match response.current_date {
            Some(cursor) => self.cursor = cursor,
            None => tracing::warn!(cursor = self.cursor, "Response has no current_date, keeping cursor"),
        }

        Ok(outcome)
    }

    /// Returns `false` when `message` repeats the last delivered one.
    async fn send_if_changed(&mut self, message: String) -> Result<bool, PollError> {
        if self.last_message.as_deref() == Some(message.as_str()) {
            tracing::debug!("Message unchanged since last send, skipping");
            return Ok(false);
        }
        self.notifier.notify(&message).await?;
        self.last_message = Some(message);
        Ok(true)
    }
}

#[cfg(test)]
impl<A, N> Poller<A, N> {
    fn cursor(&self) -> i64 {
        self.cursor
    }

    fn last_message(&self) -> Option<&str> {
        self.last_message.as_deref()
    }
}

//! Cancellation and deadline context for on-chain reads.

use std::future::Future;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::error::ProtocolError;

/// Caller-supplied context attached to every address resolution and
/// precondition read.
///
/// No deadline is imposed unless one is set with [`CallContext::with_timeout`].
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    cancel: CancellationToken,
    timeout: Option<Duration>,
}

impl CallContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Drive `fut` to completion unless the context is cancelled or its
    /// deadline elapses first.
    pub async fn run<T, E, F>(&self, call: &str, fut: F) -> Result<T, ProtocolError>
    where
        F: Future<Output = Result<T, E>>,
        E: Into<ProtocolError>,
    {
        let guarded = async {
            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => Err(ProtocolError::Cancelled(call.to_string())),
                result = fut => result.map_err(Into::into),
            }
        };

        match self.timeout {
            Some(timeout) => tokio::time::timeout(timeout, guarded)
                .await
                .map_err(|_| ProtocolError::DeadlineExceeded {
                    call: call.to_string(),
                    timeout,
                })?,
            None => guarded.await,
        }
    }
}

use showroom_core::AppError;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Artificial delay mimicking API latency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulatedLatency {
    delay: Duration,
}

impl SimulatedLatency {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// No delay at all; calls still observe cancellation.
    pub fn none() -> Self {
        Self {
            delay: Duration::ZERO,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Wait out the delay, or fail with `AppError::Cancelled` as soon as the
    /// token fires. An already-cancelled token fails immediately.
    pub async fn wait(&self, operation: &str, cancel: &CancellationToken) -> Result<(), AppError> {
        if cancel.is_cancelled() {
            return Err(AppError::Cancelled(operation.to_string()));
        }
        if self.delay.is_zero() {
            return Ok(());
        }

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!(operation, "Simulated call cancelled");
                Err(AppError::Cancelled(operation.to_string()))
            }
            _ = tokio::time::sleep(self.delay) => Ok(()),
        }
    }
}

impl Default for SimulatedLatency {
    fn default() -> Self {
        Self::new(showroom_core::constants::DEFAULT_SIMULATED_LATENCY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_wait_completes_after_delay() {
        let latency = SimulatedLatency::new(Duration::from_millis(500));
        let start = tokio::time::Instant::now();
        latency
            .wait("load", &CancellationToken::new())
            .await
            .unwrap();
        assert!(start.elapsed() >= Duration::from_millis(500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_cancelled_midway() {
        let latency = SimulatedLatency::new(Duration::from_secs(5));
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            trigger.cancel();
        });

        let result = latency.wait("save", &cancel).await;
        assert!(matches!(result, Err(AppError::Cancelled(op)) if op == "save"));
    }

    #[tokio::test]
    async fn test_pre_cancelled_token_fails_without_delay() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let result = SimulatedLatency::none().wait("delete", &cancel).await;
        assert!(matches!(result, Err(AppError::Cancelled(_))));
    }
}

use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use super::{DynProvider, Provider};
use crate::errors::GenerationFailed;
use crate::wire::{Decoding, Instruction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first one.
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl RetryPolicy {
    /// Delay before retry number `retry` (0-based): `base * 2^retry`, capped.
    pub fn delay_for(&self, retry: u32) -> Duration {
        self.base_delay
            .saturating_mul(2u32.saturating_pow(retry))
            .min(self.max_delay)
    }
}

/// Retries transient failures with exponential backoff. Terminal failures,
/// and the last transient one, are returned unchanged.
pub struct Retrying {
    inner: DynProvider,
    policy: RetryPolicy,
}

impl Retrying {
    pub fn new(inner: DynProvider, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }
}

#[async_trait]
impl Provider for Retrying {
    async fn complete(&self, ins: &Instruction, decoding: Decoding) -> Result<String, GenerationFailed> {
        let max_attempts = self.policy.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            match self.inner.complete(ins, decoding).await {
                Ok(text) => return Ok(text),
                Err(e) if e.kind.is_transient() && attempt < max_attempts => {
                    let delay = self.policy.delay_for(attempt - 1);
                    warn!(attempt, max_attempts, ?delay, error = %e, "transient generation failure, retrying");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

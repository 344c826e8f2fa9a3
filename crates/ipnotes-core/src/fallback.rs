//! Ordered fallback over a list of providers.
//!
//! Providers are tried strictly in sequence; the first success wins. There
//! is no retry of a single provider, no backoff and no racing. Used for the
//! gateway list, but independent of any transport.

use std::fmt::Display;
use std::future::Future;

/// Every provider failed. Errors are kept in provider order.
#[derive(Debug)]
pub struct Exhausted<E> {
    pub errors: Vec<E>,
}

impl<E> Exhausted<E> {
    /// Number of providers that were attempted.
    pub fn attempts(&self) -> usize {
        self.errors.len()
    }
}

/// Try `attempt` against each provider in order, returning the first `Ok`.
///
/// Failures are logged at `warn` with the provider's display form before
/// moving on.
pub async fn first_success<P, T, E, F, Fut>(
    providers: &[P],
    mut attempt: F,
) -> Result<T, Exhausted<E>>
where
    P: Display,
    E: Display,
    F: FnMut(&P) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut errors = Vec::with_capacity(providers.len());
    for provider in providers {
        match attempt(provider).await {
            Ok(value) => return Ok(value),
            Err(err) => {
                tracing::warn!(provider = %provider, error = %err, "provider failed, trying next");
                errors.push(err);
            }
        }
    }
    Err(Exhausted { errors })
}

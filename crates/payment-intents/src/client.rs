//! The asynchronous service boundary.
//!
//! Everything below this module is pure and synchronous; the three calls
//! here — fetch parameters, submit, poll status — are the only suspension
//! points in an intent's life. Status polling is strictly bounded: hitting
//! the attempt ceiling is a terminal typed failure, never a hang.

use std::time::Duration;

use wallet_core::{KeyPair, PublicKey};

use crate::error::ClientError;
use crate::intents::{Intent, SubmitIntentRequest};
use crate::server_parameter::ServerParameter;

/// Attempt ceiling for status polling.
pub const MAX_POLL_ATTEMPTS: u32 = 50;

/// Terminal and non-terminal intent states as reported by the server.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum IntentStatus {
    Pending,
    Confirmed,
    Failed,
}

/// The abstract transaction service. Implementations own transport,
/// authentication and retry of individual requests; the contract here is
/// only that each call resolves to a result or a typed failure.
pub trait TransactionService {
    fn fetch_server_parameters(
        &self,
        intent_id: PublicKey,
        actions: usize,
    ) -> impl std::future::Future<Output = Result<Vec<ServerParameter>, ClientError>> + Send;

    fn submit_actions(
        &self,
        request: &SubmitIntentRequest,
    ) -> impl std::future::Future<Output = Result<(), ClientError>> + Send;

    fn fetch_intent_status(
        &self,
        intent_id: PublicKey,
    ) -> impl std::future::Future<Output = Result<IntentStatus, ClientError>> + Send;
}

/// Drive one composed intent through parameter exchange, signing and
/// submission.
///
/// The intent's own state is the only thing mutated; the caller commits
/// the result tray only after this returns `Ok`.
pub async fn submit_intent<I, S>(
    service: &S,
    intent: &mut I,
    owner: &KeyPair,
) -> Result<(), ClientError>
where
    I: Intent,
    S: TransactionService,
{
    let intent_id = intent.id();
    let action_count = intent.action_group().len();

    let parameters = service
        .fetch_server_parameters(intent_id, action_count)
        .await?;
    intent.action_group_mut().apply_parameters(parameters)?;

    let request = intent.submittable(owner)?;
    tracing::debug!(
        intent = %intent_id,
        actions = request.actions.len(),
        signatures = request.signatures.len(),
        "submitting intent"
    );

    service.submit_actions(&request).await
}

/// Poll until the server reports a status, with attempt-scaled backoff.
///
/// The delay grows every ten attempts (0ms for the first ten, then 50ms,
/// 100ms, ...). Exhausting `max_attempts` is terminal.
pub async fn poll_intent_status<S>(
    service: &S,
    intent_id: PublicKey,
    max_attempts: u32,
) -> Result<IntentStatus, ClientError>
where
    S: TransactionService,
{
    for attempt in 0..max_attempts {
        let delay = Duration::from_millis(50 * (attempt as u64 / 10));
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        match service.fetch_intent_status(intent_id).await {
            Ok(status) => {
                tracing::debug!(intent = %intent_id, attempt, ?status, "intent status");
                return Ok(status);
            }
            Err(error) => {
                tracing::debug!(intent = %intent_id, attempt, %error, "status not available yet");
            }
        }
    }

    Err(ClientError::PollLimitReached)
}

//! Redis pub/sub broker for cross-instance scoreboard fan-out.
//!
//! A service that mutates a scoreboard publishes `{match_id, lock_version}`
//! on `scoreboard:<match_id>`; every instance's subscriber task re-broadcasts
//! to its local sessions through the registry. Single-instance deployments
//! can run without Redis and rely on the in-process registry alone.

use std::sync::Arc;
use std::time::Duration;

use rand::random;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tokio::time::sleep;
use tokio_stream::StreamExt;
use tracing::{error, info, warn};

use crate::error::AppError;
use crate::ws::hub::{BoardBroadcast, ScoreboardRegistry};

#[derive(Debug, Serialize, Deserialize)]
struct RedisEnvelope {
    match_id: i64,
    lock_version: i32,
}

pub struct RealtimeBroker {
    registry: Arc<ScoreboardRegistry>,
    publisher: Mutex<ConnectionManager>,
}

// Subscriber retry configuration (background task)
const INITIAL_RETRY_DELAY_SECS: u64 = 1;
const MAX_RETRY_DELAY_SECS: u64 = 60;
const RETRY_DELAY_MULTIPLIER: f64 = 2.0;
const JITTER_PERCENT: f64 = 0.2;

// Publisher retry configuration (HTTP request path)
const PUBLISHER_MAX_ATTEMPTS: u32 = 3;
const PUBLISHER_RETRY_DELAY_MS: u64 = 50;

impl RealtimeBroker {
    /// Connect the publisher and spawn the subscriber task.
    pub async fn connect(
        redis_url: &str,
        registry: Arc<ScoreboardRegistry>,
    ) -> Result<Arc<Self>, AppError> {
        let client = Client::open(redis_url)
            .map_err(|err| AppError::config(format!("Invalid REDIS_URL: {err}")))?;

        let manager = ConnectionManager::new(client)
            .await
            .map_err(|err| {
                AppError::internal(format!("Unable to connect to Redis for realtime sync: {err}"))
            })?;

        let broker = Arc::new(Self {
            registry: registry.clone(),
            publisher: Mutex::new(manager),
        });

        spawn_subscriber(redis_url, registry);

        Ok(broker)
    }

    pub fn registry(&self) -> Arc<ScoreboardRegistry> {
        self.registry.clone()
    }

    /// Publish a board change; retried a few times on transient failures.
    pub async fn publish_board(&self, match_id: i64, lock_version: i32) -> Result<(), AppError> {
        let envelope = RedisEnvelope {
            match_id,
            lock_version,
        };
        let encoded = serde_json::to_string(&envelope)
            .map_err(|err| AppError::internal(format!("Failed to serialize board event: {err}")))?;
        let channel = format!("scoreboard:{match_id}");

        let mut attempt = 0u32;
        loop {
            attempt += 1;

            let publish_res = {
                let mut publisher = self.publisher.lock().await;
                publisher
                    .publish::<_, _, ()>(channel.clone(), encoded.clone())
                    .await
            };

            match publish_res {
                Ok(_) => return Ok(()),
                Err(err) => {
                    if attempt >= PUBLISHER_MAX_ATTEMPTS {
                        return Err(AppError::internal(format!(
                            "Failed to publish board event to Redis: {err}"
                        )));
                    }
                    warn!(error = %err, attempt, "Redis publish failed, retrying");
                    sleep(Duration::from_millis(PUBLISHER_RETRY_DELAY_MS)).await;
                }
            }
        }
    }
}

fn spawn_subscriber(redis_url: &str, registry: Arc<ScoreboardRegistry>) {
    let redis_url = redis_url.to_string();
    tokio::spawn(async move {
        run_subscription_loop_with_retry(&redis_url, registry).await;
    });
}

fn calculate_retry_delay(attempt: u32) -> Duration {
    let base_delay =
        INITIAL_RETRY_DELAY_SECS as f64 * RETRY_DELAY_MULTIPLIER.powi(attempt as i32 - 1);
    let capped_delay = base_delay.min(MAX_RETRY_DELAY_SECS as f64);

    let jitter_range = capped_delay * JITTER_PERCENT;
    let jitter = (random::<f64>() * 2.0 - 1.0) * jitter_range;
    let final_delay = (capped_delay + jitter).max(0.1);

    Duration::from_secs_f64(final_delay)
}

async fn run_subscription_loop_with_retry(redis_url: &str, registry: Arc<ScoreboardRegistry>) {
    let mut attempt = 0u32;

    loop {
        attempt += 1;

        match run_subscription_loop(redis_url, registry.clone()).await {
            Ok(()) => {
                info!("Redis subscription loop completed normally");
                break;
            }
            Err(err) => {
                let delay = calculate_retry_delay(attempt);
                warn!(
                    error = %err,
                    attempt,
                    retry_delay_secs = delay.as_secs_f64(),
                    "Redis subscription failed, retrying"
                );
                sleep(delay).await;

                // cap the exponent so the delay stays bounded
                if attempt >= 20 {
                    attempt = 10;
                }
            }
        }
    }
}

async fn run_subscription_loop(
    redis_url: &str,
    registry: Arc<ScoreboardRegistry>,
) -> Result<(), AppError> {
    let client = Client::open(redis_url)
        .map_err(|err| AppError::config(format!("Failed to create Redis client: {err}")))?;

    let mut pubsub = client.get_async_pubsub().await.map_err(|err| {
        AppError::internal(format!("Failed to connect to Redis for subscription: {err}"))
    })?;

    info!("Subscribing to Redis pattern 'scoreboard:*'");
    pubsub.psubscribe("scoreboard:*").await.map_err(|err| {
        AppError::internal(format!("Failed to subscribe to scoreboard channels: {err}"))
    })?;

    info!("Redis subscription established, processing messages");

    let mut stream = pubsub.into_on_message();

    while let Some(msg) = stream.next().await {
        let Ok(channel) = msg.get_channel::<String>() else {
            continue;
        };
        let Ok(payload) = msg.get_payload::<String>() else {
            continue;
        };

        match serde_json::from_str::<RedisEnvelope>(&payload) {
            Ok(envelope) => {
                if parse_scoreboard_channel(&channel) != Some(envelope.match_id) {
                    warn!(
                        channel = %channel,
                        match_id = envelope.match_id,
                        "[WS BROKER] board event on mismatched channel"
                    );
                }
                registry.broadcast(
                    envelope.match_id,
                    BoardBroadcast {
                        match_id: envelope.match_id,
                        lock_version: envelope.lock_version,
                    },
                );
            }
            Err(err) => {
                error!(
                    error = %err,
                    channel = %channel,
                    "Failed to decode Redis realtime payload"
                );
            }
        }
    }

    warn!("Redis subscription stream ended, connection lost");
    Err(AppError::internal(
        "Redis subscription stream ended unexpectedly",
    ))
}

fn parse_scoreboard_channel(channel: &str) -> Option<i64> {
    channel.strip_prefix("scoreboard:")?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::parse_scoreboard_channel;

    #[test]
    fn channel_names_round_trip() {
        assert_eq!(parse_scoreboard_channel("scoreboard:42"), Some(42));
        assert_eq!(parse_scoreboard_channel("scoreboard:abc"), None);
        assert_eq!(parse_scoreboard_channel("game:42"), None);
    }
}

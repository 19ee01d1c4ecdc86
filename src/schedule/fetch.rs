use std::future::Future;
use std::path::{Path, PathBuf};

use log::{error, info};
use thiserror::Error;
use tokio::time::{sleep, Duration};

use crate::auth::client::WilmaClient;
use crate::error::WilmaError;
use crate::schedule::resource::ResourceType;

/// Delay before retrying a failed schedule request.
pub const RETRY_DELAY: Duration = Duration::from_secs(20);
/// Politeness pause between consecutive days.
const DAY_PAUSE: Duration = Duration::from_secs(1);

/// One attempt of a schedule GET can fail in two retryable ways; both are
/// handled the same (log, wait, try again) and never escalate.
#[derive(Debug, Error)]
enum FetchFailure {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("getting status code: {0}. Nothing to save")]
    Status(reqwest::StatusCode),
}

/// How long and how often to retry a transient failure. Production use is
/// uncapped; tests cap the attempts and drop the delay.
pub struct RetryPolicy {
    pub delay: Duration,
    pub max_attempts: Option<u32>,
}

impl RetryPolicy {
    pub fn uncapped(delay: Duration) -> RetryPolicy {
        RetryPolicy {
            delay,
            max_attempts: None,
        }
    }

    pub fn capped(delay: Duration, max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            delay,
            max_attempts: Some(max_attempts),
        }
    }
}

/// Runs `op` until it succeeds, sleeping `policy.delay` between attempts.
/// With a capped policy the cap surfaces as `RetriesExhausted`; an uncapped
/// policy loops forever.
pub async fn retry_until<T, E, F, Fut>(policy: &RetryPolicy, mut op: F) -> Result<T, WilmaError>
where
    E: std::fmt::Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut attempts = 0u32;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) => {
                attempts += 1;
                if let Some(max) = policy.max_attempts {
                    if attempts >= max {
                        error!("{}. Giving up after {} attempts.", e, attempts);
                        return Err(WilmaError::RetriesExhausted(attempts));
                    }
                }
                error!("{}. Sleeping {:?} and trying again.", e, policy.delay);
                sleep(policy.delay).await;
            }
        }
    }
}

/// Query path for one day of one resource. Wilma wants the same date as both
/// period start (`p`) and finish (`f`).
pub fn schedule_path(day: &str, resource: ResourceType) -> String {
    format!("schedule/index_json?p={}&f={}&{}=all", day, day, resource)
}

/// Output file name for one (resource, date) pair. Re-running over the same
/// range overwrites these files, which keeps re-runs idempotent.
pub fn schedule_file_name(output_path: &Path, resource: ResourceType, day: &str) -> PathBuf {
    output_path.join(format!("{}-{}-data.json", resource, day))
}

async fn try_fetch_day(
    wilma: &WilmaClient,
    day: &str,
    resource: ResourceType,
) -> Result<String, FetchFailure> {
    let url = wilma.url(&schedule_path(day, resource));
    let res = wilma.client().get(url).send().await?;

    let status = res.status();
    if status != reqwest::StatusCode::OK {
        return Err(FetchFailure::Status(status));
    }

    Ok(res.text().await?)
}

/// Writes the raw response body verbatim. A write failure is fatal.
pub fn write_schedule_file(
    output_path: &Path,
    resource: ResourceType,
    day: &str,
    body: &str,
) -> Result<PathBuf, WilmaError> {
    let path = schedule_file_name(output_path, resource, day);
    std::fs::write(&path, body).map_err(|source| WilmaError::WriteFailed {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

/// The main dump loop: walk the dates in order, retry each day until the
/// server answers 200, write the body, pause, move on. Strictly sequential.
pub async fn fetch_range(
    wilma: &WilmaClient,
    resource: ResourceType,
    dates: &[String],
    output_path: &Path,
    policy: &RetryPolicy,
) -> Result<(), WilmaError> {
    for day in dates {
        let body = retry_until(policy, || try_fetch_day(wilma, day, resource)).await?;
        write_schedule_file(output_path, resource, day, &body)?;
        info!("Processed resource {} at the date {}.", resource, day);
        sleep(DAY_PAUSE).await;
    }

    Ok(())
}

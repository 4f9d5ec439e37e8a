//! Rate limit guard for the GitHub core API.
//!
//! Before heavy steps the runner reads the remaining quota and, when it is
//! nearly spent, sleeps until GitHub's reported reset time. There is no
//! queuing and no backoff; this only avoids walking into a hard 403.

mod info;

pub use info::RateLimitInfo;

use crate::github::{ApiError, GitHubApi};
use std::time::Duration;
use tracing::{info, warn};

/// Maximum time to wait for rate limit reset (1 hour).
const MAX_WAIT_SECS: u64 = 3600;

/// Minimum remaining requests before proactively waiting.
const MIN_REMAINING_THRESHOLD: u32 = 5;

/// Computes how long to sleep before the next call, if at all.
///
/// `now` is a Unix timestamp in seconds. Waits are capped at one hour.
#[must_use]
pub fn wait_duration(info: &RateLimitInfo, now: u64) -> Option<Duration> {
    if info.remaining >= MIN_REMAINING_THRESHOLD || info.reset <= now {
        return None;
    }

    let wait_secs = info.reset - now;
    if wait_secs > MAX_WAIT_SECS {
        warn!(
            wait_secs,
            max_wait = MAX_WAIT_SECS,
            "Rate limit reset too far in future, capping wait time"
        );
    }

    Some(Duration::from_secs(wait_secs.min(MAX_WAIT_SECS)))
}

/// Waits if the rate limit is low, returning true if we waited.
pub async fn wait_if_needed(info: &RateLimitInfo) -> bool {
    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();

    let Some(wait) = wait_duration(info, now) else {
        return false;
    };

    info!(
        remaining = info.remaining,
        limit = info.limit,
        wait_secs = wait.as_secs(),
        "Rate limit low, waiting for reset"
    );
    tokio::time::sleep(wait).await;
    true
}

/// Ensures sufficient core quota before making API calls.
///
/// # Errors
///
/// Returns an error if the rate limit check fails.
pub async fn ensure_core_rate_limit<C>(client: &C) -> Result<(), ApiError>
where
    C: GitHubApi + ?Sized,
{
    let info = client.core_rate_limit().await?;
    wait_if_needed(&info).await;
    Ok(())
}

/// Runs [`ensure_core_rate_limit`] when the guard is enabled.
///
/// A failed quota check is logged and otherwise ignored.
pub async fn guard_core_rate_limit<C>(client: &C, enabled: bool)
where
    C: GitHubApi + ?Sized,
{
    if !enabled {
        return;
    }
    if let Err(e) = ensure_core_rate_limit(client).await {
        warn!(error = %e, "Rate limit check failed, continuing");
    }
}

//! Test Helpers

use std::{future::Future, time::Duration};

const POLL_INTERVAL: Duration = Duration::from_millis(5);
const POLL_ATTEMPTS: usize = 400;

/// Poll `condition` until it holds or roughly two seconds pass.
pub(crate) async fn wait_until<F, Fut>(mut condition: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    for _ in 0..POLL_ATTEMPTS {
        if condition().await {
            return true;
        }

        tokio::time::sleep(POLL_INTERVAL).await;
    }

    false
}

use thiserror::Error;
use tracing::{trace, warn};

#[derive(Error, Debug, PartialEq)]
#[error("Retry failed after {0} attempts")]
pub struct RetryFailed(pub u32);

// Keep calling `f` until it produces a value or the attempts run out.
pub fn retry<T, F>(times: u32, mut f: F) -> Result<T, RetryFailed>
where
    F: FnMut() -> Option<T>,
{
    for attempt in 0..times {
        if let Some(value) = f() {
            return Ok(value);
        }
        trace!("Retry triggered. Attempt: {}", attempt + 1);
    }
    warn!("No more retry attempts after {} tries", times);
    Err(RetryFailed(times))
}

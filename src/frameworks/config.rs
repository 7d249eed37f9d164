use std::{env, time::Duration};

// Runtime constants for step execution (not demo physics tuning).

/// Per-request deadline for worker-dispatched steps.
pub fn step_timeout() -> Duration {
    let millis = env::var("STEP_TIMEOUT_MS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(5_000);
    Duration::from_millis(millis)
}

pub fn demo_step_count() -> usize {
    env::var("DEMO_STEP_COUNT")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .unwrap_or(2_000)
}

pub const REQUEST_CHANNEL_CAPACITY: usize = 64;
pub const REPLY_CHANNEL_CAPACITY: usize = 64;

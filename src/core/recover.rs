//! Automatic restore after a block
//!
//! When enabled, a block that actually created the rule arms a countdown.
//! Once it runs out the restore flow runs exactly as if the restore button
//! had been pressed. A manual restore or turning the option off disarms it.

use crate::core::actions::{self, ActionOutcome};
use crate::core::error::{Error, Result};
use crate::core::netsh::CommandRunner;
use crate::core::status::RuleStatus;
use std::time::{Duration, Instant};
use tracing::{debug, info};

pub const DEFAULT_RECOVER_SECS: u32 = 20;
pub const MIN_RECOVER_SECS: u32 = 1;
pub const MAX_RECOVER_SECS: u32 = 999;

/// Auto-recover setting: on by default with a 20 second delay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoRecover {
    pub enabled: bool,
    pub seconds: u32,
}

impl Default for AutoRecover {
    fn default() -> Self {
        Self {
            enabled: true,
            seconds: DEFAULT_RECOVER_SECS,
        }
    }
}

impl AutoRecover {
    pub const fn disabled() -> Self {
        Self {
            enabled: false,
            seconds: DEFAULT_RECOVER_SECS,
        }
    }

    /// Parses a setting value: a number of seconds, or `0`/`off` to disable.
    ///
    /// # Errors
    ///
    /// Returns `Err` for anything else, including delays above 999 seconds.
    pub fn parse(value: &str) -> Result<Self> {
        let value = value.trim();
        if value == "0" || value.eq_ignore_ascii_case("off") {
            return Ok(Self::disabled());
        }
        Ok(Self {
            enabled: true,
            seconds: parse_seconds(value)?,
        })
    }
}

/// Parses a delay in whole seconds within 1-999.
///
/// # Errors
///
/// Returns `Err` if the input is not a number or is out of range.
pub fn parse_seconds(input: &str) -> Result<u32> {
    let input = input.trim();
    let seconds: u32 = input
        .parse()
        .map_err(|_| Error::InvalidRecoverDelay(format!("'{input}' is not a number of seconds")))?;

    if (MIN_RECOVER_SECS..=MAX_RECOVER_SECS).contains(&seconds) {
        Ok(seconds)
    } else {
        Err(Error::InvalidRecoverDelay(format!(
            "{seconds}s is outside {MIN_RECOVER_SECS}-{MAX_RECOVER_SECS}s"
        )))
    }
}

/// Whether a finished block should arm the countdown.
///
/// Only a block that left the rule in place counts; a no-op block (rule
/// already there) or one whose add failed does not.
pub fn should_arm(outcome: &ActionOutcome) -> bool {
    outcome.status == RuleStatus::Blocked && outcome.notice.is_none() && outcome.failure.is_none()
}

/// A running auto-recover countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    deadline: Instant,
    remaining: u32,
}

impl Countdown {
    pub fn start(seconds: u32, now: Instant) -> Self {
        debug!("Auto-recover armed for {}s", seconds);
        Self {
            deadline: now + Duration::from_secs(u64::from(seconds)),
            remaining: seconds,
        }
    }

    /// Whole seconds left, rounded up
    pub const fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Updates the remaining time; returns `true` once the deadline passed
    pub fn tick(&mut self, now: Instant) -> bool {
        let left = self.deadline.saturating_duration_since(now);
        let secs = left.as_secs() + u64::from(left.subsec_nanos() > 0);
        self.remaining = u32::try_from(secs).unwrap_or(u32::MAX);
        left.is_zero()
    }
}

/// Waits `seconds`, reporting each remaining second, then runs restore
pub async fn recover_after<R: CommandRunner>(
    runner: &R,
    seconds: u32,
    mut on_tick: impl FnMut(u32),
) -> ActionOutcome {
    for remaining in (1..=seconds).rev() {
        on_tick(remaining);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    info!("Auto-recover delay of {}s elapsed, restoring", seconds);
    actions::restore(runner).await
}

//! Rule status polling
//!
//! The rule state is never cached: every poll asks netsh again. `show rule`
//! exits 1 when no rule with the name exists, which is the only outcome read
//! as [`RuleStatus::Normal`]. Every other outcome, including a successful
//! exit, another exit code, or netsh failing to start at all, is read as
//! [`RuleStatus::Blocked`].

use crate::core::error::Result;
use crate::core::netsh::{CommandRunner, FirewallCommand};
use tracing::{debug, info, warn};

/// Exit code `netsh ... show rule` uses for "no rules match"
pub const RULE_NOT_FOUND_EXIT_CODE: i32 = 1;

/// Whether matchmaking traffic is currently blocked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleStatus {
    /// No block rule present
    Normal,
    /// Block rule present (or state could not be determined)
    Blocked,
}

impl RuleStatus {
    /// Maps the outcome of a `show rule` invocation to a status
    pub fn from_query(outcome: &Result<Option<i32>>) -> Self {
        match outcome {
            Ok(Some(RULE_NOT_FOUND_EXIT_CODE)) => Self::Normal,
            _ => Self::Blocked,
        }
    }

    /// Single-character indicator: `"1"` for normal, `"0"` for blocked
    pub const fn indicator(self) -> &'static str {
        match self {
            Self::Normal => "1",
            Self::Blocked => "0",
        }
    }

    pub const fn is_blocked(self) -> bool {
        matches!(self, Self::Blocked)
    }

    /// Banner text shown for this status
    pub const fn banner_text(self) -> &'static str {
        match self {
            Self::Normal => "目前狀態：配對目前正常",
            Self::Blocked => "目前狀態：配對已阻斷",
        }
    }
}

impl std::fmt::Display for RuleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::Blocked => write!(f, "blocked"),
        }
    }
}

/// Queries the rule and derives the current status
pub async fn poll<R: CommandRunner>(runner: &R) -> RuleStatus {
    let outcome = runner.run(&FirewallCommand::ShowRule).await;

    match &outcome {
        Ok(code) => debug!("show rule exited with {:?}", code),
        Err(e) => warn!("Rule query failed, reporting blocked: {e}"),
    }

    let status = RuleStatus::from_query(&outcome);
    info!("Rule status: {} ({})", status, status.indicator());
    status
}

//! Block, restore and console action flows
//!
//! Each flow polls the rule status before and after touching the firewall
//! and reports back an [`ActionOutcome`]. The flows never surface command
//! failures to the user; they are logged and the flow carries on, except
//! for restore, which stops when the delete fails.

use crate::core::netsh::{CommandRunner, FirewallCommand, run_checked};
use crate::core::ports::PortPair;
use crate::core::status::{self, RuleStatus};
use tracing::{error, info};

/// Informational notice for an action that had nothing to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    AlreadyBlocked,
    AlreadyNormal,
}

impl Notice {
    pub const fn title(self) -> &'static str {
        "Warning"
    }

    pub const fn message(self) -> &'static str {
        match self {
            Self::AlreadyBlocked => "配對早已封鎖，請勿點按",
            Self::AlreadyNormal => "配對早已正常，請勿點按",
        }
    }
}

/// What the UI should do after an action finished
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome {
    /// Status from the last query the flow issued
    pub status: RuleStatus,
    /// Notice to show when the action was a no-op
    pub notice: Option<Notice>,
    /// Set when the flow stopped early on a failed command
    pub failure: Option<String>,
}

impl ActionOutcome {
    pub fn polled(status: RuleStatus) -> Self {
        Self {
            status,
            notice: None,
            failure: None,
        }
    }

    fn with_notice(mut self, notice: Notice) -> Self {
        self.notice = Some(notice);
        self
    }

    fn with_failure(mut self, failure: String) -> Self {
        self.failure = Some(failure);
        self
    }
}

/// Polls the rule status without changing anything
pub async fn refresh<R: CommandRunner>(runner: &R) -> ActionOutcome {
    ActionOutcome::polled(status::poll(runner).await)
}

/// Creates and enables the block rule for the selected port pair.
///
/// Does nothing but show a notice when the rule is already in place. A
/// failed add does not stop the enable step; if add succeeds and enable
/// fails the rule is left as netsh created it.
pub async fn block<R: CommandRunner>(runner: &R, pair: PortPair) -> ActionOutcome {
    info!("Block requested for {}", pair);

    if status::poll(runner).await.is_blocked() {
        info!("Rule already present, nothing to block");
        return refresh(runner).await.with_notice(Notice::AlreadyBlocked);
    }

    let add = FirewallCommand::AddBlockRule(pair.range());
    if let Err(e) = run_checked(runner, &add).await {
        error!("Failed to add block rule for {}: {e}", pair);
    }

    if let Err(e) = run_checked(runner, &FirewallCommand::EnableRule).await {
        error!("Failed to enable block rule: {e}");
    }

    refresh(runner).await
}

/// Deletes the block rule.
///
/// Shows a notice when there is no rule. When the delete fails the flow
/// stops without re-polling and reports the status seen before the delete.
pub async fn restore<R: CommandRunner>(runner: &R) -> ActionOutcome {
    info!("Restore requested");

    let before = status::poll(runner).await;
    if !before.is_blocked() {
        info!("No rule present, nothing to restore");
        return refresh(runner).await.with_notice(Notice::AlreadyNormal);
    }

    if let Err(e) = run_checked(runner, &FirewallCommand::DeleteRule).await {
        error!("Failed to remove firewall rule: {e}");
        return ActionOutcome::polled(before).with_failure(e.to_string());
    }

    refresh(runner).await
}

/// Opens the firewall console and refreshes the status.
///
/// The console launch is detached: it is neither awaited nor cancelled,
/// and its result never reaches the UI. The poll that follows does not wait
/// for it and reflects the state from before the console opened.
pub async fn open_console<R: CommandRunner>(runner: &R) -> ActionOutcome {
    info!("Opening firewall console");
    runner.launch_detached(&FirewallCommand::OpenConsole);
    refresh(runner).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_helpers::MockRunner;

    #[tokio::test]
    async fn test_block_when_normal_adds_and_enables() {
        let runner = MockRunner::new();
        let outcome = block(&runner, PortPair::P4950).await;

        assert_eq!(
            runner.mutating_calls(),
            vec![
                FirewallCommand::AddBlockRule(PortPair::P4950.range()),
                FirewallCommand::EnableRule,
            ]
        );
        assert_eq!(runner.calls().last(), Some(&FirewallCommand::ShowRule));
        assert_eq!(outcome.status, RuleStatus::Blocked);
        assert_eq!(outcome.notice, None);
    }

    #[tokio::test]
    async fn test_block_when_blocked_is_noop_with_notice() {
        let runner = MockRunner::blocked();
        let outcome = block(&runner, PortPair::P4950).await;

        assert!(runner.mutating_calls().is_empty());
        assert_eq!(outcome.notice, Some(Notice::AlreadyBlocked));
        assert_eq!(outcome.status, RuleStatus::Blocked);
    }

    #[tokio::test]
    async fn test_block_runs_enable_even_when_add_fails() {
        let runner = MockRunner::new().with_exit(
            FirewallCommand::AddBlockRule(PortPair::P4950.range()),
            Some(1),
        );
        let outcome = block(&runner, PortPair::P4950).await;

        assert_eq!(runner.count(&FirewallCommand::EnableRule), 1);
        // Nothing was created, so the follow-up poll still sees no rule
        assert_eq!(outcome.status, RuleStatus::Normal);
        assert_eq!(outcome.notice, None);
    }

    #[tokio::test]
    async fn test_block_leaves_rule_when_enable_fails() {
        let runner = MockRunner::new().with_spawn_failure(FirewallCommand::EnableRule);
        let outcome = block(&runner, PortPair::P4960).await;

        assert!(runner.state().rule_exists);
        assert_eq!(outcome.status, RuleStatus::Blocked);
    }

    #[tokio::test]
    async fn test_block_3074_scenario() {
        let runner = MockRunner::new();
        assert_eq!(refresh(&runner).await.status, RuleStatus::Normal);

        let outcome = block(&runner, PortPair::P3074).await;

        let add = &runner.mutating_calls()[0];
        let args = add.args().join(" ");
        assert!(args.contains("localport=3074-3080"));
        assert!(args.contains("protocol=UDP"));
        assert!(args.contains("dir=out"));
        assert!(args.contains("action=block"));

        let state = runner.state();
        assert!(state.rule_exists && state.rule_enabled);
        drop(state);
        assert_eq!(outcome.status, RuleStatus::Blocked);
    }

    #[tokio::test]
    async fn test_restore_when_blocked_deletes_once() {
        let runner = MockRunner::blocked();
        let outcome = restore(&runner).await;

        assert_eq!(runner.mutating_calls(), vec![FirewallCommand::DeleteRule]);
        assert_eq!(outcome.status, RuleStatus::Normal);
        assert_eq!(outcome.notice, None);
    }

    #[tokio::test]
    async fn test_restore_when_normal_is_noop_with_notice() {
        let runner = MockRunner::new();
        let outcome = restore(&runner).await;

        assert!(runner.mutating_calls().is_empty());
        assert_eq!(outcome.notice, Some(Notice::AlreadyNormal));
        assert_eq!(outcome.status, RuleStatus::Normal);
    }

    #[tokio::test]
    async fn test_restore_aborts_without_repoll_when_delete_fails() {
        let runner = MockRunner::blocked().with_exit(FirewallCommand::DeleteRule, Some(1));
        let outcome = restore(&runner).await;

        assert_eq!(
            runner.calls(),
            vec![FirewallCommand::ShowRule, FirewallCommand::DeleteRule]
        );
        assert_eq!(outcome.status, RuleStatus::Blocked);
        assert_eq!(outcome.notice, None);
        assert_eq!(
            outcome.failure.as_deref(),
            Some("netsh delete rule failed with exit code 1")
        );
    }

    #[tokio::test]
    async fn test_open_console_launches_detached_and_polls() {
        let runner = MockRunner::new();
        let outcome = open_console(&runner).await;

        assert_eq!(runner.state().detached, vec![FirewallCommand::OpenConsole]);
        assert_eq!(runner.calls(), vec![FirewallCommand::ShowRule]);
        assert_eq!(outcome.status, RuleStatus::Normal);
    }

    #[tokio::test]
    async fn test_block_then_restore_round_trip() {
        let runner = MockRunner::new();
        assert_eq!(
            block(&runner, PortPair::P4980).await.status,
            RuleStatus::Blocked
        );
        assert_eq!(restore(&runner).await.status, RuleStatus::Normal);
        assert!(!runner.state().rule_exists);
    }
}

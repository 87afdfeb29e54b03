//! Auto-recover handlers
//!
//! A block that created the rule arms a [`Countdown`]. The one-second
//! subscription ticks it, and when it runs out the restore flow starts the
//! same way the restore button would.

use crate::app::handlers::firewall::{begin_action, handle_action_finished};
use crate::app::{Message, State};
use crate::core::actions::{self, ActionOutcome};
use crate::core::recover::{self, Countdown, MAX_RECOVER_SECS};
use iced::Task;
use std::time::Instant;
use tracing::{debug, info};

pub(crate) fn handle_auto_recover_toggled(state: &mut State, enabled: bool) {
    info!(
        "Auto-recover {}",
        if enabled { "enabled" } else { "disabled" }
    );
    state.auto_recover.enabled = enabled;
    if !enabled && state.countdown.take().is_some() {
        info!("Auto-recover countdown cancelled");
    }
}

/// Keeps the field to at most three digits and adopts it once it is valid.
///
/// A running countdown keeps the delay it was armed with.
pub(crate) fn handle_recover_seconds_changed(state: &mut State, input: &str) {
    let max_digits = MAX_RECOVER_SECS.to_string().len();
    state.recover_input = input
        .chars()
        .filter(char::is_ascii_digit)
        .take(max_digits)
        .collect();

    match recover::parse_seconds(&state.recover_input) {
        Ok(seconds) => state.auto_recover.seconds = seconds,
        Err(e) => debug!("Keeping {}s: {e}", state.auto_recover.seconds),
    }
}

/// Finishes a block and arms the countdown if the rule is now in place
pub(crate) fn handle_block_finished(
    state: &mut State,
    outcome: ActionOutcome,
    now: Instant,
) -> Task<Message> {
    let arm = state.auto_recover.enabled && recover::should_arm(&outcome);
    let task = handle_action_finished(state, outcome);

    if arm {
        info!("Auto-recover in {}s", state.auto_recover.seconds);
        state.countdown = Some(Countdown::start(state.auto_recover.seconds, now));
    }
    task
}

/// Advances the countdown and starts the restore once it expires.
///
/// If another action is still running the expired countdown stays armed and
/// the restore starts on a later tick.
pub(crate) fn handle_recover_tick(state: &mut State, now: Instant) -> Task<Message> {
    let Some(countdown) = state.countdown.as_mut() else {
        return Task::none();
    };
    if !countdown.tick(now) || !begin_action(state, "Auto-recover") {
        return Task::none();
    }

    state.countdown = None;
    info!("Auto-recover countdown finished, restoring");

    let runner = state.runner.clone();
    Task::perform(
        async move { actions::restore(&runner).await },
        Message::ActionFinished,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::handlers::test_utils::create_idle_state;
    use crate::core::actions::Notice;
    use crate::core::status::RuleStatus;
    use crate::core::test_helpers::MockRunner;
    use std::time::Duration;

    #[test]
    fn test_initial_setting_comes_from_config() {
        let state = create_idle_state();
        assert!(state.auto_recover.enabled);
        assert_eq!(state.auto_recover.seconds, 20);
        assert_eq!(state.recover_input, "20");
        assert!(state.countdown.is_none());
    }

    #[test]
    fn test_successful_block_arms_countdown() {
        let mut state = create_idle_state();
        state.busy = true;
        let now = Instant::now();

        let _ = handle_block_finished(&mut state, ActionOutcome::polled(RuleStatus::Blocked), now);

        assert!(!state.busy);
        assert_eq!(state.countdown, Some(Countdown::start(20, now)));
    }

    #[test]
    fn test_noop_or_failed_block_does_not_arm() {
        let mut state = create_idle_state();
        let already = ActionOutcome {
            notice: Some(Notice::AlreadyBlocked),
            ..ActionOutcome::polled(RuleStatus::Blocked)
        };
        let _ = handle_block_finished(&mut state, already, Instant::now());
        assert!(state.countdown.is_none());

        let _ = handle_block_finished(
            &mut state,
            ActionOutcome::polled(RuleStatus::Normal),
            Instant::now(),
        );
        assert!(state.countdown.is_none());
    }

    #[test]
    fn test_disabled_setting_does_not_arm() {
        let mut state = create_idle_state();
        handle_auto_recover_toggled(&mut state, false);

        let _ = handle_block_finished(
            &mut state,
            ActionOutcome::polled(RuleStatus::Blocked),
            Instant::now(),
        );

        assert!(state.countdown.is_none());
    }

    #[test]
    fn test_toggle_off_cancels_running_countdown() {
        let mut state = create_idle_state();
        state.countdown = Some(Countdown::start(20, Instant::now()));

        handle_auto_recover_toggled(&mut state, false);

        assert!(state.countdown.is_none());
        assert!(!state.auto_recover.enabled);
    }

    #[test]
    fn test_seconds_field_filters_and_clamps_length() {
        let mut state = create_idle_state();

        handle_recover_seconds_changed(&mut state, "4a5");
        assert_eq!(state.recover_input, "45");
        assert_eq!(state.auto_recover.seconds, 45);

        handle_recover_seconds_changed(&mut state, "12345");
        assert_eq!(state.recover_input, "123");
        assert_eq!(state.auto_recover.seconds, 123);
    }

    #[test]
    fn test_invalid_seconds_keep_last_valid_value() {
        let mut state = create_idle_state();
        handle_recover_seconds_changed(&mut state, "30");

        handle_recover_seconds_changed(&mut state, "");
        assert_eq!(state.recover_input, "");
        assert_eq!(state.auto_recover.seconds, 30);

        handle_recover_seconds_changed(&mut state, "0");
        assert_eq!(state.auto_recover.seconds, 30);
    }

    #[test]
    fn test_tick_before_deadline_only_counts_down() {
        let mut state = create_idle_state();
        let start = Instant::now();
        state.countdown = Some(Countdown::start(20, start));

        let _ = handle_recover_tick(&mut state, start + Duration::from_secs(5));

        assert_eq!(state.countdown.map(|c| c.remaining()), Some(15));
        assert!(!state.busy);
    }

    #[test]
    fn test_expired_tick_starts_restore() {
        let mut state = create_idle_state();
        let start = Instant::now();
        state.countdown = Some(Countdown::start(20, start));

        let _ = handle_recover_tick(&mut state, start + Duration::from_secs(20));

        assert!(state.countdown.is_none());
        assert!(state.busy);
    }

    #[test]
    fn test_expired_tick_waits_for_running_action() {
        let mut state = create_idle_state();
        let start = Instant::now();
        state.countdown = Some(Countdown::start(1, start));
        state.busy = true;

        let _ = handle_recover_tick(&mut state, start + Duration::from_secs(2));
        assert!(state.countdown.is_some());

        state.busy = false;
        let _ = handle_recover_tick(&mut state, start + Duration::from_secs(3));
        assert!(state.countdown.is_none());
        assert!(state.busy);
    }

    #[tokio::test]
    async fn test_countdown_restore_clears_block() {
        let runner = MockRunner::new();
        let mut state = create_idle_state();
        let start = Instant::now();

        let blocked = actions::block(&runner, state.selected_pair).await;
        let _ = handle_block_finished(&mut state, blocked, start);
        assert_eq!(state.banner.status, Some(RuleStatus::Blocked));

        let _ = handle_recover_tick(&mut state, start + Duration::from_secs(20));
        assert!(state.busy);

        // The tick's task runs this same flow against the real runner
        let restored = actions::restore(&runner).await;
        let _ = handle_action_finished(&mut state, restored);

        assert_eq!(state.banner.status, Some(RuleStatus::Normal));
        assert!(!runner.state().rule_exists);
        assert!(state.countdown.is_none());
    }
}

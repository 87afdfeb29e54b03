//! Button and poll-result handlers
//!
//! Every button starts exactly one action flow as a task. The flow reports
//! an [`ActionOutcome`], which is the only thing allowed to change the
//! status banner. The buttons are disabled while a flow runs; the busy
//! check here also covers the auto-recover timer firing mid-action.

use crate::app::{Message, State};
use crate::core::actions::{self, ActionOutcome, Notice};
use crate::core::ports::PortPair;
use iced::Task;
use tracing::{debug, info, warn};

/// Handles a dropdown selection; no side effect beyond the held selection
pub(crate) fn handle_port_selected(state: &mut State, pair: PortPair) {
    debug!("Port pair set to {}", pair);
    state.selected_pair = pair;
}

/// Marks the state busy, or returns `false` when an action is already running
pub(crate) fn begin_action(state: &mut State, what: &str) -> bool {
    if state.busy {
        debug!("{} ignored, an action is still running", what);
        return false;
    }
    debug!("{} pressed", what);
    state.busy = true;
    true
}

pub(crate) fn handle_block_clicked(state: &mut State) -> Task<Message> {
    if !begin_action(state, "Block button") {
        return Task::none();
    }

    let runner = state.runner.clone();
    let pair = state.selected_pair;
    Task::perform(
        async move { actions::block(&runner, pair).await },
        Message::BlockFinished,
    )
}

pub(crate) fn handle_restore_clicked(state: &mut State) -> Task<Message> {
    if !begin_action(state, "Restore button") {
        return Task::none();
    }
    if state.countdown.take().is_some() {
        info!("Manual restore cancels the auto-recover countdown");
    }

    let runner = state.runner.clone();
    Task::perform(
        async move { actions::restore(&runner).await },
        Message::ActionFinished,
    )
}

pub(crate) fn handle_console_clicked(state: &mut State) -> Task<Message> {
    if !begin_action(state, "Open console button") {
        return Task::none();
    }

    let runner = state.runner.clone();
    Task::perform(
        async move { actions::open_console(&runner).await },
        Message::ActionFinished,
    )
}

/// Applies a finished action to the banner and shows its notice, if any
pub(crate) fn handle_action_finished(state: &mut State, outcome: ActionOutcome) -> Task<Message> {
    state.busy = false;
    state.banner.apply(outcome.status, &state.theme);

    if let Some(failure) = &outcome.failure {
        warn!("Action stopped early: {failure}");
    }

    match outcome.notice {
        Some(notice) => show_notice(notice),
        None => Task::none(),
    }
}

fn show_notice(notice: Notice) -> Task<Message> {
    let dialog = rfd::AsyncMessageDialog::new()
        .set_level(rfd::MessageLevel::Info)
        .set_title(notice.title())
        .set_description(notice.message())
        .set_buttons(rfd::MessageButtons::Ok);

    Task::perform(dialog.show(), |_| Message::NoticeClosed)
}

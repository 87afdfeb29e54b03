pub mod banner;
pub mod handlers;
pub mod ui_components;
pub mod view;

use crate::config::AppConfig;
use crate::core::actions::{self, ActionOutcome};
use crate::core::netsh::SystemRunner;
use crate::core::ports::PortPair;
use crate::core::recover::{AutoRecover, Countdown};
use banner::StatusBanner;
use iced::{Element, Task};
use std::time::{Duration, Instant};

pub struct State {
    pub runner: SystemRunner,
    pub port_pairs: Vec<PortPair>,
    pub selected_pair: PortPair,
    pub banner: StatusBanner,
    /// An action is running; the action buttons are disabled until it reports back
    pub busy: bool,
    pub auto_recover: AutoRecover,
    /// Text of the seconds field, which may be mid-edit and not yet valid
    pub recover_input: String,
    pub countdown: Option<Countdown>,
    pub theme: crate::theme::AppTheme,
    pub font_regular: iced::Font,
}

#[derive(Debug, Clone)]
pub enum Message {
    PortSelected(PortPair),
    ConsoleClicked,
    BlockClicked,
    RestoreClicked,
    AutoRecoverToggled(bool),
    RecoverSecondsChanged(String),
    RecoverTick,
    BlockFinished(ActionOutcome),
    ActionFinished(ActionOutcome),
    NoticeClosed,
}

impl State {
    pub fn view(&self) -> Element<'_, Message> {
        view::view(self)
    }

    /// Builds the initial state and polls the rule once
    pub fn new(config: &AppConfig, font_regular: Option<iced::Font>) -> (Self, Task<Message>) {
        let theme = crate::theme::AppTheme::standard();
        let runner = SystemRunner::from_config(config);
        let banner = StatusBanner::pending(&theme);

        let startup_runner = runner.clone();
        (
            Self {
                runner,
                port_pairs: PortPair::all(),
                selected_pair: PortPair::default(),
                banner,
                busy: true,
                auto_recover: config.auto_recover,
                recover_input: config.auto_recover.seconds.to_string(),
                countdown: None,
                theme,
                font_regular: font_regular.unwrap_or(iced::Font::DEFAULT),
            },
            Task::perform(
                async move { actions::refresh(&startup_runner).await },
                Message::ActionFinished,
            ),
        )
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PortSelected(pair) => handlers::handle_port_selected(self, pair),
            Message::ConsoleClicked => return handlers::handle_console_clicked(self),
            Message::BlockClicked => return handlers::handle_block_clicked(self),
            Message::RestoreClicked => return handlers::handle_restore_clicked(self),
            Message::AutoRecoverToggled(enabled) => {
                handlers::handle_auto_recover_toggled(self, enabled);
            }
            Message::RecoverSecondsChanged(input) => {
                handlers::handle_recover_seconds_changed(self, &input);
            }
            Message::RecoverTick => return handlers::handle_recover_tick(self, Instant::now()),
            Message::BlockFinished(outcome) => {
                return handlers::handle_block_finished(self, outcome, Instant::now());
            }
            Message::ActionFinished(outcome) => {
                return handlers::handle_action_finished(self, outcome);
            }
            Message::NoticeClosed => {}
        }
        Task::none()
    }

    pub fn subscription(&self) -> iced::Subscription<Message> {
        if self.countdown.is_some() {
            iced::time::every(Duration::from_secs(1)).map(|_| Message::RecoverTick)
        } else {
            iced::Subscription::none()
        }
    }
}

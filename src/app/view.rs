//! Main window layout
//!
//! A single fixed column: header, status banner, port picker, auto-recover
//! row, the three action buttons and a footer.

use crate::app::ui_components::{
    block_button, main_container, port_picker, port_picker_menu, recover_checkbox,
    recover_seconds_input, restore_button, secondary_button, status_banner_container,
};
use crate::app::{Message, State};
use iced::widget::{button, checkbox, column, container, pick_list, row, text, text_input};
use iced::{Alignment, Element, Length};

pub const HEADER_TEXT: &str = "Warframe 配對限制器（強制主機）\n[ 封鎖 UDP 輸出 Port ]";
pub const TIP_TEXT: &str = "請選擇您 Warframe 的 UDP 輸出 Port";
pub const AUTO_RECOVER_TEXT: &str = "自動恢復配對（秒）";
pub const CONSOLE_BUTTON_TEXT: &str = "查看防火牆";
pub const BLOCK_BUTTON_TEXT: &str = "阻止配對[封鎖UDP輸出]";
pub const RESTORE_BUTTON_TEXT: &str = "恢復配對[恢復UDP輸出]";

const CONTROL_WIDTH: f32 = 200.0;

/// Line under the banner: the countdown while one runs, the tip otherwise
pub fn tip_line(state: &State) -> String {
    match &state.countdown {
        Some(countdown) => format!("{} 秒後自動恢復配對", countdown.remaining()),
        None => TIP_TEXT.to_string(),
    }
}

/// Press message for an action button, or `None` to disable it while busy
pub fn action_press(state: &State, message: Message) -> Option<Message> {
    (!state.busy).then_some(message)
}

pub fn view(state: &State) -> Element<'_, Message> {
    let theme = &state.theme;
    let font = state.font_regular;

    let header = text(HEADER_TEXT)
        .size(14)
        .font(font)
        .width(Length::Fill)
        .align_x(Alignment::Center);

    let banner = container(text(state.banner.text).size(18).font(font))
        .padding([6, 0])
        .center_x(Length::Fill)
        .style(move |_| status_banner_container(&state.banner));

    let tip = text(tip_line(state))
        .size(14)
        .font(font)
        .width(Length::Fill)
        .align_x(Alignment::Center);

    let picker = pick_list(
        &state.port_pairs[..],
        Some(state.selected_pair),
        Message::PortSelected,
    )
    .font(font)
    .width(Length::Fixed(CONTROL_WIDTH))
    .padding(6)
    .style(move |_, status| port_picker(theme, status))
    .menu_style(move |_| port_picker_menu(theme));

    let recover = row![
        checkbox(state.auto_recover.enabled)
            .on_toggle(Message::AutoRecoverToggled)
            .size(16)
            .spacing(0)
            .style(move |_, status| recover_checkbox(theme, status)),
        text(AUTO_RECOVER_TEXT).size(13).font(font),
        text_input("20", &state.recover_input)
            .on_input_maybe(
                state
                    .auto_recover
                    .enabled
                    .then_some(Message::RecoverSecondsChanged),
            )
            .size(13)
            .font(font)
            .padding([2, 6])
            .width(Length::Fixed(48.0))
            .style(move |_, status| recover_seconds_input(theme, status)),
    ]
    .spacing(6)
    .align_y(Alignment::Center);

    let action_button = |label: &'static str, height: f32, message: Message| {
        button(
            text(label)
                .size(14)
                .font(font)
                .width(Length::Fill)
                .align_x(Alignment::Center),
        )
        .on_press_maybe(action_press(state, message))
        .width(Length::Fixed(CONTROL_WIDTH))
        .height(Length::Fixed(height))
        .padding([8, 10])
    };

    let console = action_button(CONSOLE_BUTTON_TEXT, 35.0, Message::ConsoleClicked)
        .style(move |_, status| secondary_button(theme, status));
    let block = action_button(BLOCK_BUTTON_TEXT, 50.0, Message::BlockClicked)
        .style(move |_, status| block_button(theme, status));
    let restore = action_button(RESTORE_BUTTON_TEXT, 50.0, Message::RestoreClicked)
        .style(move |_, status| restore_button(theme, status));

    let footer = text(concat!("wfblock v", env!("CARGO_PKG_VERSION")))
        .size(11)
        .font(font)
        .color(theme.fg_muted)
        .width(Length::Fill)
        .align_x(Alignment::Center);

    container(
        column![
            header, banner, tip, picker, recover, console, block, restore, footer
        ]
        .spacing(6)
        .padding([10, 25])
        .align_x(Alignment::Center),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .style(move |_| main_container(theme))
    .into()
}

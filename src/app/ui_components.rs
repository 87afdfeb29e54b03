use crate::app::banner::StatusBanner;
use crate::theme::AppTheme;
use iced::widget::{button, checkbox, container, pick_list, text_input};
use iced::{Border, Color, Shadow, Vector};

pub fn main_container(theme: &AppTheme) -> container::Style {
    container::Style {
        background: Some(theme.bg_base.into()),
        text_color: Some(theme.fg_primary),
        ..Default::default()
    }
}

/// Colored status strip under the header
pub fn status_banner_container(banner: &StatusBanner) -> container::Style {
    container::Style {
        background: Some(banner.background.into()),
        text_color: Some(banner.text_color),
        ..Default::default()
    }
}

fn scale(color: Color, factor: f32) -> Color {
    Color {
        r: (color.r * factor).min(1.0),
        g: (color.g * factor).min(1.0),
        b: (color.b * factor).min(1.0),
        ..color
    }
}

/// Filled button in a fixed color, lighter on hover and darker when pressed
fn filled_button(
    theme: &AppTheme,
    fill: Color,
    text_color: Color,
    status: button::Status,
) -> button::Style {
    let base = button::Style {
        background: Some(fill.into()),
        text_color,
        border: Border {
            radius: 4.0.into(),
            ..Default::default()
        },
        shadow: Shadow {
            color: theme.shadow_color,
            offset: Vector::new(0.0, 2.0),
            blur_radius: 3.0,
        },
        ..Default::default()
    };

    match status {
        button::Status::Hovered => button::Style {
            background: Some(scale(fill, 1.08).into()),
            shadow: Shadow {
                color: theme.shadow_color,
                offset: Vector::new(0.0, 2.5),
                blur_radius: 4.0,
            },
            ..base
        },
        button::Status::Pressed => button::Style {
            background: Some(scale(fill, 0.95).into()),
            shadow: Shadow {
                color: theme.shadow_color,
                offset: Vector::new(0.0, 0.5),
                blur_radius: 1.5,
            },
            ..base
        },
        button::Status::Disabled => button::Style {
            background: Some(Color { a: 0.5, ..fill }.into()),
            text_color: Color {
                a: 0.5,
                ..text_color
            },
            shadow: Shadow {
                color: Color::TRANSPARENT,
                offset: Vector::new(0.0, 0.0),
                blur_radius: 0.0,
            },
            ..base
        },
        button::Status::Active => base,
    }
}

pub fn block_button(theme: &AppTheme, status: button::Status) -> button::Style {
    filled_button(theme, theme.blocked, theme.fg_on_blocked, status)
}

pub fn restore_button(theme: &AppTheme, status: button::Status) -> button::Style {
    filled_button(theme, theme.normal, theme.fg_on_normal, status)
}

pub fn secondary_button(theme: &AppTheme, status: button::Status) -> button::Style {
    let mut style = filled_button(theme, theme.bg_surface, theme.fg_primary, status);
    style.border = Border {
        color: theme.border,
        width: 1.0,
        radius: 4.0.into(),
    };
    style
}

const FIELD_RADIUS: f32 = 10.0;

fn field_border(color: Color, width: f32) -> Border {
    Border {
        color,
        width,
        radius: FIELD_RADIUS.into(),
    }
}

/// Port pair dropdown; the border turns magenta while the menu is open
pub fn port_picker(theme: &AppTheme, status: pick_list::Status) -> pick_list::Style {
    let (background, border) = match status {
        pick_list::Status::Active => (theme.bg_surface, field_border(theme.border, 1.0)),
        pick_list::Status::Hovered => (theme.bg_hover, field_border(theme.border_strong, 1.0)),
        pick_list::Status::Opened { .. } => (theme.bg_surface, field_border(theme.pending, 2.0)),
    };

    pick_list::Style {
        background: background.into(),
        border,
        handle_color: theme.fg_primary,
        placeholder_color: theme.fg_muted,
        text_color: theme.fg_primary,
    }
}

/// Dropdown menu: the highlighted pair uses the block color, since picking
/// it is the first step of a block
pub fn port_picker_menu(theme: &AppTheme) -> iced::overlay::menu::Style {
    iced::overlay::menu::Style {
        background: theme.bg_base.into(),
        border: field_border(theme.border, 1.0),
        shadow: Shadow::default(),
        text_color: theme.fg_primary,
        selected_background: theme.blocked.into(),
        selected_text_color: theme.fg_on_blocked,
    }
}

/// Auto-recover checkbox, filled with the restore color when on
pub fn recover_checkbox(theme: &AppTheme, status: checkbox::Status) -> checkbox::Style {
    let (is_checked, hovered, disabled) = match status {
        checkbox::Status::Active { is_checked } => (is_checked, false, false),
        checkbox::Status::Hovered { is_checked } => (is_checked, true, false),
        checkbox::Status::Disabled { is_checked } => (is_checked, false, true),
    };

    let fill = match (is_checked, hovered) {
        (true, true) => scale(theme.normal, 1.08),
        (true, false) => theme.normal,
        (false, true) => theme.bg_hover,
        (false, false) => theme.bg_surface,
    };
    let alpha = if disabled { 0.5 } else { 1.0 };

    checkbox::Style {
        background: Color { a: alpha, ..fill }.into(),
        icon_color: theme.fg_on_normal,
        border: Border {
            color: if is_checked { fill } else { theme.border_strong },
            width: 1.0,
            radius: 3.0.into(),
        },
        text_color: Some(theme.fg_primary),
    }
}

/// Seconds field next to the auto-recover checkbox
pub fn recover_seconds_input(theme: &AppTheme, status: text_input::Status) -> text_input::Style {
    let (background, border, value) = match status {
        text_input::Status::Active => (theme.bg_surface, field_border(theme.border, 1.0), theme.fg_primary),
        text_input::Status::Hovered => (
            theme.bg_hover,
            field_border(theme.border_strong, 1.0),
            theme.fg_primary,
        ),
        text_input::Status::Focused { .. } => {
            (theme.bg_surface, field_border(theme.normal, 2.0), theme.fg_primary)
        }
        text_input::Status::Disabled => (
            Color { a: 0.5, ..theme.bg_surface },
            field_border(Color { a: 0.3, ..theme.border }, 1.0),
            theme.fg_muted,
        ),
    };

    text_input::Style {
        background: background.into(),
        border,
        icon: theme.fg_muted,
        placeholder: theme.fg_muted,
        value,
        selection: Color { a: 0.4, ..theme.normal },
    }
}

//! Status banner shown under the header

use crate::core::status::RuleStatus;
use crate::theme::AppTheme;
use iced::Color;

pub const PENDING_TEXT: &str = "初始化";

/// Display state of the status banner.
///
/// Set once at construction and replaced wholesale whenever a poll result
/// arrives.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusBanner {
    pub background: Color,
    pub text_color: Color,
    pub text: &'static str,
    /// Status last applied; `None` until the first poll finishes
    pub status: Option<RuleStatus>,
}

impl StatusBanner {
    /// Banner shown before the first poll completes
    pub fn pending(theme: &AppTheme) -> Self {
        Self {
            background: theme.pending,
            text_color: theme.fg_on_pending,
            text: PENDING_TEXT,
            status: None,
        }
    }

    pub fn for_status(status: RuleStatus, theme: &AppTheme) -> Self {
        let (background, text_color) = match status {
            RuleStatus::Normal => (theme.normal, theme.fg_on_normal),
            RuleStatus::Blocked => (theme.blocked, theme.fg_on_blocked),
        };
        Self {
            background,
            text_color,
            text: status.banner_text(),
            status: Some(status),
        }
    }

    pub fn apply(&mut self, status: RuleStatus, theme: &AppTheme) {
        *self = Self::for_status(status, theme);
    }
}

use iced::Color;

/// Theme definition with semantic color naming
#[derive(Debug, Clone, PartialEq)]
pub struct AppTheme {
    // === Background Layers ===
    pub bg_base: Color,    // Window background
    pub bg_surface: Color, // Dropdown, neutral buttons
    pub bg_hover: Color,   // Hover states

    // === Foreground/Text ===
    pub fg_primary: Color, // Main text
    pub fg_muted: Color,   // Footer, placeholder text

    // === Status Colors ===
    pub blocked: Color,       // Rule present, block button
    pub fg_on_blocked: Color, // Text on blocked color
    pub normal: Color,        // Rule absent, restore button
    pub fg_on_normal: Color,  // Text on normal color
    pub pending: Color,       // Banner before the first poll
    pub fg_on_pending: Color, // Text on pending color

    // === Borders ===
    pub accent: Color,        // Focused dropdown
    pub border: Color,        // Default borders
    pub border_strong: Color, // Emphasized borders

    // === Shadows ===
    pub shadow_color: Color,
}

impl AppTheme {
    /// Creates a theme from RGB hex values for easier definition
    #[allow(clippy::too_many_arguments)]
    pub fn from_hex(
        bg_base: u32,
        bg_surface: u32,
        bg_hover: u32,
        fg_primary: u32,
        fg_muted: u32,
        blocked: u32,
        fg_on_blocked: u32,
        normal: u32,
        fg_on_normal: u32,
        pending: u32,
        fg_on_pending: u32,
        accent: u32,
        border: u32,
        border_strong: u32,
    ) -> Self {
        Self {
            bg_base: hex_to_color(bg_base),
            bg_surface: hex_to_color(bg_surface),
            bg_hover: hex_to_color(bg_hover),
            fg_primary: hex_to_color(fg_primary),
            fg_muted: hex_to_color(fg_muted),
            blocked: hex_to_color(blocked),
            fg_on_blocked: hex_to_color(fg_on_blocked),
            normal: hex_to_color(normal),
            fg_on_normal: hex_to_color(fg_on_normal),
            pending: hex_to_color(pending),
            fg_on_pending: hex_to_color(fg_on_pending),
            accent: hex_to_color(accent),
            border: hex_to_color(border),
            border_strong: hex_to_color(border_strong),
            shadow_color: Color::from_rgba(0.0, 0.0, 0.0, 0.3),
        }
    }

    /// The one theme the tool ships with
    pub fn standard() -> Self {
        Self::from_hex(
            0x2B2D31, // bg_base
            0x3A3D43, // bg_surface
            0x484C53, // bg_hover
            0xF2F3F5, // fg_primary
            0x9EA3AB, // fg_muted
            0xC20E12, // blocked
            0xFFFFFF, // fg_on_blocked
            0x00CD66, // normal
            0x000000, // fg_on_normal
            0xC800C8, // pending
            0x000000, // fg_on_pending
            0x5865F2, // accent
            0x4E5259, // border
            0x6B7078, // border_strong
        )
    }
}

impl Default for AppTheme {
    fn default() -> Self {
        Self::standard()
    }
}

/// Converts hex color (0xRRGGBB) to iced Color
#[allow(clippy::cast_precision_loss)]
pub fn hex_to_color(hex: u32) -> Color {
    Color::from_rgb(
        ((hex >> 16) & 0xFF) as f32 / 255.0,
        ((hex >> 8) & 0xFF) as f32 / 255.0,
        (hex & 0xFF) as f32 / 255.0,
    )
}

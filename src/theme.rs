//! Centralized theme constants for AI Vision
//! All colors, sizes, and styling should reference these constants

use crate::app::results::RankAccent;
use crate::types::ThemeMode;
use egui::Color32;

// =============================================================================
// COLORS - Palettes
// =============================================================================

/// Mode-dependent colors. Everything that differs between dark and light
/// lives here; mode-independent accents are plain constants below.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub bg_base: Color32,
    pub bg_card: Color32,
    pub bg_surface: Color32,
    pub border: Color32,
    pub drop_zone_border: Color32,
    pub drop_zone_fill: Color32,
    pub text_primary: Color32,
    pub text_secondary: Color32,
    pub text_muted: Color32,
    pub bar_track: Color32,
    pub bar_muted: Color32,
    pub error_fill: Color32,
    pub error_stroke: Color32,
    pub error_text: Color32,
    pub toggle_icon: Color32,
}

pub const DARK: Palette = Palette {
    bg_base: Color32::from_rgb(0x02, 0x06, 0x17),            // slate-950
    bg_card: Color32::from_rgb(0x0f, 0x17, 0x2a),            // slate-900
    bg_surface: Color32::from_rgb(0x1e, 0x29, 0x3b),         // slate-800
    border: Color32::from_rgb(0x33, 0x41, 0x55),             // slate-700
    drop_zone_border: Color32::from_rgb(0x47, 0x55, 0x69),   // slate-600
    drop_zone_fill: Color32::from_rgb(0x0b, 0x12, 0x24),
    text_primary: Color32::WHITE,
    text_secondary: Color32::from_rgb(0xe2, 0xe8, 0xf0),     // slate-200
    text_muted: Color32::from_rgb(0x94, 0xa3, 0xb8),         // slate-400
    bar_track: Color32::from_rgb(0x33, 0x41, 0x55),          // slate-700
    bar_muted: Color32::from_rgb(0x64, 0x74, 0x8b),          // slate-500
    error_fill: Color32::from_rgb(0x3b, 0x12, 0x18),
    error_stroke: Color32::from_rgb(0x7f, 0x1d, 0x1d),       // red-900
    error_text: Color32::from_rgb(0xfe, 0xca, 0xca),         // red-200
    toggle_icon: Color32::from_rgb(0xfd, 0xe0, 0x47),        // yellow-300
};

pub const LIGHT: Palette = Palette {
    bg_base: Color32::from_rgb(0xf8, 0xfa, 0xfc),            // slate-50
    bg_card: Color32::WHITE,
    bg_surface: Color32::from_rgb(0xf1, 0xf5, 0xf9),         // slate-100
    border: Color32::from_rgb(0xe2, 0xe8, 0xf0),             // slate-200
    drop_zone_border: Color32::from_rgb(0xcb, 0xd5, 0xe1),   // slate-300
    drop_zone_fill: Color32::from_rgb(0xf8, 0xfa, 0xfc),
    text_primary: Color32::from_rgb(0x1e, 0x29, 0x3b),       // slate-800
    text_secondary: Color32::from_rgb(0x33, 0x41, 0x55),     // slate-700
    text_muted: Color32::from_rgb(0x47, 0x55, 0x69),         // slate-600
    bar_track: Color32::from_rgb(0xe2, 0xe8, 0xf0),          // slate-200
    bar_muted: Color32::from_rgb(0x94, 0xa3, 0xb8),          // slate-400
    error_fill: Color32::from_rgb(0xfe, 0xf2, 0xf2),         // red-50
    error_stroke: Color32::from_rgb(0xfe, 0xca, 0xca),       // red-200
    error_text: Color32::from_rgb(0xdc, 0x26, 0x26),         // red-600
    toggle_icon: Color32::from_rgb(0xf5, 0x9e, 0x0b),        // amber-500
};

pub fn palette(mode: ThemeMode) -> &'static Palette {
    match mode {
        ThemeMode::Dark => &DARK,
        ThemeMode::Light => &LIGHT,
    }
}

// =============================================================================
// COLORS - Accent (Cyan / Blue)
// =============================================================================
pub const ACCENT: Color32 = Color32::from_rgb(0x06, 0xb6, 0xd4); // cyan-500
pub const ACCENT_STRONG: Color32 = Color32::from_rgb(0x25, 0x63, 0xeb); // blue-600
pub const ACCENT_SUCCESS: Color32 = Color32::from_rgb(0x34, 0xd3, 0x99); // emerald-400
pub const ACCENT_LOADING: Color32 = Color32::from_rgb(0xf5, 0x9e, 0x0b); // amber-500

// =============================================================================
// COLORS - Status
// =============================================================================
pub const STATUS_SUCCESS: Color32 = Color32::from_rgb(0x34, 0xd3, 0x99); // emerald-400
pub const STATUS_WARNING: Color32 = Color32::from_rgb(0xfb, 0xbf, 0x24); // amber-400
pub const STATUS_ERROR: Color32 = Color32::from_rgb(0xf8, 0x71, 0x71); // red-400

// =============================================================================
// COLORS - Buttons
// =============================================================================
pub const BTN_ACCENT: Color32 = Color32::from_rgb(0x25, 0x63, 0xeb); // blue-600
pub const BTN_ACCENT_TEXT: Color32 = Color32::WHITE;
pub const BTN_DISABLED_DARK: Color32 = Color32::from_rgb(0x33, 0x41, 0x55); // slate-700
pub const BTN_DISABLED_LIGHT: Color32 = Color32::from_rgb(0xe2, 0xe8, 0xf0); // slate-200

// =============================================================================
// COLORS - Result bars
// =============================================================================

/// Bar fill for a rank. Only the muted rank depends on the mode.
pub fn rank_color(accent: RankAccent, palette: &Palette) -> Color32 {
    match accent {
        RankAccent::Primary => ACCENT_SUCCESS,
        RankAccent::Secondary => ACCENT,
        RankAccent::Muted => palette.bar_muted,
    }
}

// =============================================================================
// TYPOGRAPHY - Font Sizes
// =============================================================================
pub const FONT_DISPLAY: f32 = 40.0;
pub const FONT_RESULT: f32 = 28.0;
pub const FONT_CONFIDENCE: f32 = 22.0;
pub const FONT_HEADING: f32 = 18.0;
pub const FONT_BODY: f32 = 14.0;
pub const FONT_LABEL: f32 = 13.0;
pub const FONT_SMALL: f32 = 11.0;

// =============================================================================
// DIMENSIONS - Layout
// =============================================================================
pub const CONTENT_MAX_WIDTH: f32 = 480.0;
pub const DROP_ZONE_HEIGHT: f32 = 220.0;
pub const PREVIEW_MAX_HEIGHT: f32 = 256.0;
pub const BUTTON_HEIGHT_LARGE: f32 = 48.0;
pub const BAR_HEIGHT: f32 = 10.0;
pub const TOGGLE_SIZE: f32 = 40.0;

// =============================================================================
// CORNER RADIUS
// =============================================================================
pub const RADIUS_MEDIUM: f32 = 8.0;
pub const RADIUS_LARGE: f32 = 16.0;
pub const RADIUS_CARD: f32 = 24.0;

// =============================================================================
// STROKE WIDTHS
// =============================================================================
pub const STROKE_DEFAULT: f32 = 1.0;
pub const STROKE_THICK: f32 = 2.0;

// =============================================================================
// SPACING
// =============================================================================
pub const SPACING_SM: f32 = 4.0;
pub const SPACING_MD: f32 = 8.0;
pub const SPACING_LG: f32 = 16.0;
pub const SPACING_XL: f32 = 24.0;
pub const SPACING_XXL: f32 = 48.0;

// =============================================================================
// HELPER - Apply global visuals
// =============================================================================
pub fn apply_visuals(ctx: &egui::Context, mode: ThemeMode) {
    let p = palette(mode);
    let base = match mode {
        ThemeMode::Dark => egui::Visuals::dark(),
        ThemeMode::Light => egui::Visuals::light(),
    };

    // Pin egui to the session's choice; the ambient preference is tracked separately
    ctx.set_theme(egui::Theme::from(mode));

    let mut visuals = egui::Visuals {
        dark_mode: mode.is_dark(),
        panel_fill: p.bg_base,
        window_fill: p.bg_card,
        extreme_bg_color: p.bg_base,
        faint_bg_color: p.bg_surface,
        hyperlink_color: ACCENT,
        interact_cursor: Some(egui::CursorIcon::PointingHand),
        window_stroke: egui::Stroke::new(STROKE_DEFAULT, p.border),
        window_corner_radius: egui::CornerRadius::same(RADIUS_MEDIUM as u8),
        ..base
    };
    visuals.widgets.noninteractive.bg_stroke = egui::Stroke::new(STROKE_DEFAULT, p.border);
    visuals.widgets.noninteractive.fg_stroke = egui::Stroke::new(STROKE_DEFAULT, p.text_primary);
    visuals.widgets.inactive.fg_stroke = egui::Stroke::new(STROKE_DEFAULT, p.text_secondary);
    visuals.widgets.inactive.weak_bg_fill = p.bg_surface;
    visuals.widgets.hovered.fg_stroke = egui::Stroke::new(STROKE_DEFAULT, p.text_primary);
    ctx.set_visuals(visuals);

    ctx.style_mut(|style| {
        style.interaction.selectable_labels = false;
        style.spacing.item_spacing = egui::vec2(8.0, 6.0);
        style.spacing.button_padding = egui::vec2(12.0, 6.0);
    });
}

// =============================================================================
// HELPER - Card frame
// =============================================================================
pub fn card_frame(p: &Palette) -> egui::Frame {
    egui::Frame::new()
        .fill(p.bg_card)
        .stroke(egui::Stroke::new(STROKE_DEFAULT, p.border))
        .corner_radius(RADIUS_CARD)
        .inner_margin(egui::Margin::same(SPACING_XL as i8))
        .shadow(egui::epaint::Shadow {
            offset: [0, 8],
            blur: 24,
            spread: 0,
            color: Color32::from_black_alpha(40),
        })
}

// =============================================================================
// HELPER - Error banner frame
// =============================================================================
pub fn error_frame(p: &Palette) -> egui::Frame {
    egui::Frame::new()
        .fill(p.error_fill)
        .stroke(egui::Stroke::new(STROKE_DEFAULT, p.error_stroke))
        .corner_radius(RADIUS_MEDIUM)
        .inner_margin(egui::Margin::same(12))
}

// =============================================================================
// HELPER - Button styles
// =============================================================================

/// Returns (fill, draw_rect) for a custom-painted button with hover/press effects.
/// Lightens on hover, slightly lightens + shrinks on press.
pub fn button_visual(
    response: &egui::Response,
    base_fill: Color32,
    rect: egui::Rect,
) -> (Color32, egui::Rect) {
    if response.is_pointer_button_down_on() {
        (lighten(base_fill, 0.06), rect.shrink(1.5))
    } else if response.hovered() {
        (lighten(base_fill, 0.12), rect)
    } else {
        (base_fill, rect)
    }
}

fn lighten(c: Color32, amount: f32) -> Color32 {
    let r = (c.r() as f32 + (255.0 - c.r() as f32) * amount) as u8;
    let g = (c.g() as f32 + (255.0 - c.g() as f32) * amount) as u8;
    let b = (c.b() as f32 + (255.0 - c.b() as f32) * amount) as u8;
    Color32::from_rgb(r, g, b)
}

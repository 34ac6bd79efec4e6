//! Reusable UI components
//!
//! Custom-painted widgets shared by the main view. Colors always come from
//! the active [`Palette`](crate::theme::Palette).

use crate::app::results::BarView;
use crate::theme::{self, Palette};
use crate::types::{BackendStatus, ThemeMode};
use eframe::egui;

/// Small uppercase caption used above values
pub fn caption(text: &str, p: &Palette) -> egui::RichText {
    egui::RichText::new(text.to_uppercase())
        .size(theme::FONT_SMALL)
        .strong()
        .color(p.text_muted)
}

/// One ranked prediction: label and percentage above a proportional bar
pub fn prediction_bar(ui: &mut egui::Ui, rank: usize, bar: &BarView, p: &Palette) {
    ui.horizontal(|ui| {
        ui.label(
            egui::RichText::new(&bar.label)
                .size(theme::FONT_BODY)
                .strong()
                .color(p.text_secondary),
        );
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(
                egui::RichText::new(&bar.probability_text)
                    .monospace()
                    .size(theme::FONT_LABEL)
                    .color(p.text_muted),
            );
        });
    });

    let width = ui.available_width();
    let (track, _) =
        ui.allocate_exact_size(egui::vec2(width, theme::BAR_HEIGHT), egui::Sense::hover());

    // Eases from the previous result's value; a bar's first value is shown as-is
    let fill = ui.ctx().animate_value_with_time(
        ui.id().with(("prediction_bar", rank)),
        bar.fill,
        0.6 + rank as f32 * 0.1,
    );

    if ui.is_rect_visible(track) {
        let painter = ui.painter();
        let radius = theme::BAR_HEIGHT / 2.0;
        painter.rect_filled(track, radius, p.bar_track);
        let filled = bar_fill_rect(track, fill);
        if filled.width() > 0.0 {
            // Draw a full pill and clip it, so tiny fills keep their true width
            let mut pill = filled;
            pill.set_width(filled.width().max(theme::BAR_HEIGHT));
            painter
                .with_clip_rect(filled)
                .rect_filled(pill, radius, theme::rank_color(bar.accent, p));
        }
    }
}

/// Part of the track covered by `fill` (0..=1), starting at the left edge
fn bar_fill_rect(track: egui::Rect, fill: f32) -> egui::Rect {
    let mut filled = track;
    filled.set_width(track.width() * fill.clamp(0.0, 1.0));
    filled
}

/// Full-width primary action button. Disabled and loading states are
/// painted but never report clicks.
pub fn action_button(
    ui: &mut egui::Ui,
    label: &str,
    enabled: bool,
    loading: bool,
    mode: ThemeMode,
) -> egui::Response {
    let width = ui.available_width();
    let sense = if enabled { egui::Sense::click() } else { egui::Sense::hover() };
    let (rect, response) =
        ui.allocate_exact_size(egui::vec2(width, theme::BUTTON_HEIGHT_LARGE), sense);

    let base = if loading {
        theme::ACCENT_LOADING
    } else if enabled {
        theme::BTN_ACCENT
    } else if mode.is_dark() {
        theme::BTN_DISABLED_DARK
    } else {
        theme::BTN_DISABLED_LIGHT
    };
    let text_color = if enabled || loading {
        theme::BTN_ACCENT_TEXT
    } else {
        theme::palette(mode).text_muted
    };

    if enabled && response.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
    } else if !enabled && !loading && response.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::NotAllowed);
    }

    if ui.is_rect_visible(rect) {
        let (fill, draw_rect) = if enabled {
            theme::button_visual(&response, base, rect)
        } else {
            (base, rect)
        };
        let painter = ui.painter();
        painter.rect_filled(draw_rect, theme::RADIUS_LARGE, fill);

        let font = egui::FontId::proportional(theme::FONT_HEADING);
        if loading {
            let galley = painter.layout_no_wrap(label.to_owned(), font, text_color);
            let spinner_size = 18.0;
            let total = spinner_size + theme::SPACING_MD + galley.size().x;
            let left = draw_rect.center().x - total / 2.0;
            let spinner_rect = egui::Rect::from_center_size(
                egui::pos2(left + spinner_size / 2.0, draw_rect.center().y),
                egui::vec2(spinner_size, spinner_size),
            );
            egui::Spinner::new()
                .size(spinner_size)
                .color(text_color)
                .paint_at(ui, spinner_rect);
            let text_pos = egui::pos2(
                left + spinner_size + theme::SPACING_MD,
                draw_rect.center().y - galley.size().y / 2.0,
            );
            ui.painter().galley(text_pos, galley, text_color);
        } else {
            painter.text(
                draw_rect.center(),
                egui::Align2::CENTER_CENTER,
                label,
                font,
                text_color,
            );
        }
    }

    response
}

/// Round sun/moon button. Returns true if clicked.
pub fn theme_toggle(ui: &mut egui::Ui, mode: ThemeMode) -> bool {
    let p = theme::palette(mode);
    let size = egui::vec2(theme::TOGGLE_SIZE, theme::TOGGLE_SIZE);
    let (rect, response) = ui.allocate_exact_size(size, egui::Sense::click());

    if response.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
    }

    if ui.is_rect_visible(rect) {
        let (fill, draw_rect) = theme::button_visual(&response, p.bg_surface, rect);
        let painter = ui.painter();
        painter.circle(
            draw_rect.center(),
            draw_rect.width() / 2.0,
            fill,
            egui::Stroke::new(theme::STROKE_DEFAULT, p.border),
        );
        let icon = if mode.is_dark() {
            egui_phosphor::regular::MOON
        } else {
            egui_phosphor::regular::SUN
        };
        painter.text(
            draw_rect.center(),
            egui::Align2::CENTER_CENTER,
            icon,
            egui::FontId::proportional(20.0),
            p.toggle_icon,
        );
    }

    response.on_hover_text("Toggle theme").clicked()
}

/// What the upload area currently shows
pub enum DropZoneContent<'a> {
    Empty,
    /// Reading the file or decoding its preview
    Loading,
    Preview(&'a egui::TextureHandle),
    /// A file is selected but could not be decoded locally
    NoPreview,
}

/// Dashed-look upload area. Shows the preview when one is loaded.
pub fn drop_zone(
    ui: &mut egui::Ui,
    p: &Palette,
    content: DropZoneContent<'_>,
    files_hovering: bool,
) -> egui::Response {
    let width = ui.available_width();
    let height = match content {
        DropZoneContent::Preview(texture) => {
            let size = texture.size_vec2();
            let scale = (width / size.x).min(theme::PREVIEW_MAX_HEIGHT / size.y).min(1.0);
            size.y * scale + theme::SPACING_XXL + theme::SPACING_LG
        }
        _ => theme::DROP_ZONE_HEIGHT,
    };
    let (rect, response) = ui.allocate_exact_size(egui::vec2(width, height), egui::Sense::click());

    if response.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
    }

    if !ui.is_rect_visible(rect) {
        return response;
    }

    let has_file = !matches!(content, DropZoneContent::Empty);
    let highlighted = has_file || files_hovering || response.hovered();
    let border = if highlighted { theme::ACCENT } else { p.drop_zone_border };
    let fill = if files_hovering {
        p.bg_surface
    } else {
        p.drop_zone_fill
    };

    let painter = ui.painter();
    painter.rect(
        rect,
        theme::RADIUS_LARGE,
        fill,
        egui::Stroke::new(theme::STROKE_THICK, border),
        egui::StrokeKind::Inside,
    );

    let center = rect.center();
    match content {
        DropZoneContent::Preview(texture) => {
            let size = texture.size_vec2();
            let scale = ((rect.width() - theme::SPACING_XL) / size.x)
                .min(theme::PREVIEW_MAX_HEIGHT / size.y)
                .min(1.0);
            let image_size = size * scale;
            let image_rect = egui::Rect::from_min_size(
                egui::pos2(center.x - image_size.x / 2.0, rect.min.y + theme::SPACING_LG),
                image_size,
            );
            egui::Image::new(texture)
                .corner_radius(theme::RADIUS_MEDIUM)
                .paint_at(ui, image_rect);
            ui.painter().text(
                egui::pos2(center.x, image_rect.max.y + theme::SPACING_XL),
                egui::Align2::CENTER_CENTER,
                "Click to change image",
                egui::FontId::proportional(theme::FONT_LABEL),
                theme::ACCENT,
            );
        }
        DropZoneContent::Loading => {
            let spinner_rect =
                egui::Rect::from_center_size(center - egui::vec2(0.0, 16.0), egui::vec2(32.0, 32.0));
            egui::Spinner::new()
                .size(32.0)
                .color(theme::ACCENT)
                .paint_at(ui, spinner_rect);
            ui.painter().text(
                center + egui::vec2(0.0, 24.0),
                egui::Align2::CENTER_CENTER,
                "Loading image...",
                egui::FontId::proportional(theme::FONT_LABEL),
                p.text_muted,
            );
        }
        DropZoneContent::Empty | DropZoneContent::NoPreview => {
            painter.circle_filled(center - egui::vec2(0.0, 36.0), 32.0, theme::ACCENT_STRONG);
            painter.text(
                center - egui::vec2(0.0, 36.0),
                egui::Align2::CENTER_CENTER,
                egui_phosphor::regular::UPLOAD_SIMPLE,
                egui::FontId::proportional(30.0),
                egui::Color32::WHITE,
            );
            let (title, subtitle) = if has_file {
                ("Preview unavailable", "The file will still be sent as-is")
            } else {
                ("Upload an Image", "Supports JPG, PNG")
            };
            painter.text(
                center + egui::vec2(0.0, 20.0),
                egui::Align2::CENTER_CENTER,
                title,
                egui::FontId::proportional(theme::FONT_HEADING),
                p.text_secondary,
            );
            painter.text(
                center + egui::vec2(0.0, 44.0),
                egui::Align2::CENTER_CENTER,
                subtitle,
                egui::FontId::proportional(theme::FONT_LABEL),
                p.text_muted,
            );
        }
    }

    response
}

/// Colored dot with the backend status label
pub fn status_badge(ui: &mut egui::Ui, status: BackendStatus, p: &Palette) {
    let color = match status {
        BackendStatus::Checking => p.text_muted,
        BackendStatus::Online => theme::STATUS_SUCCESS,
        BackendStatus::ModelMissing => theme::STATUS_WARNING,
        BackendStatus::Offline => theme::STATUS_ERROR,
    };
    ui.horizontal(|ui| {
        let (rect, _) = ui.allocate_exact_size(egui::vec2(8.0, 8.0), egui::Sense::hover());
        ui.painter().circle_filled(rect.center(), 4.0, color);
        ui.label(
            egui::RichText::new(status.label())
                .size(theme::FONT_SMALL)
                .color(p.text_muted),
        );
    });
}

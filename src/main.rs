#![windows_subsystem = "windows"]
//! AI Vision - Main entry point

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

mod api;
mod app;
mod constants;
mod error;
mod settings;
mod theme;
mod types;
mod ui;

use app::App;
use constants::*;
use eframe::egui;
use std::path::PathBuf;
use tracing::info;
use types::*;
use ui::components::{self, DropZoneContent};

/// Initialize file logging. Returns a guard that must be held for the app lifetime.
fn init_logging(data_dir: &std::path::Path) -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_subscriber::{fmt, EnvFilter, prelude::*};

    let logs_dir = data_dir.join("logs");
    std::fs::create_dir_all(&logs_dir).ok();

    let file_appender = tracing_appender::rolling::daily(&logs_dir, "ai-vision.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,ai_vision=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    guard
}

fn main() -> eframe::Result<()> {
    let data_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME);

    std::fs::create_dir_all(&data_dir).ok();

    // Initialize logging - guard must live for entire app lifetime
    let _log_guard = init_logging(&data_dir);

    info!(version = APP_VERSION, "AI Vision starting");

    let settings = settings::Settings::load(&data_dir).with_env_overrides();
    let win_pos = match (settings.window_x, settings.window_y) {
        (Some(x), Some(y)) => Some(egui::pos2(x, y)),
        _ => None,
    };
    let win_size = match (settings.window_w, settings.window_h) {
        (Some(w), Some(h)) => Some(egui::vec2(w, h)),
        _ => None,
    };

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size(win_size.unwrap_or(egui::vec2(640.0, 860.0)))
        .with_min_inner_size([420.0, 560.0])
        .with_title(APP_NAME)
        .with_drag_and_drop(true);

    if let Some(pos) = win_pos {
        viewport = viewport.with_position(pos);
    }

    let options = eframe::NativeOptions {
        viewport,
        centered: win_pos.is_none(),
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        options,
        Box::new(move |cc| {
            let app = App::new(cc, settings, data_dir)?;
            Ok(Box::new(app))
        }),
    )
}

// ============================================================================
// MAIN UPDATE LOOP & UI RENDERING
// ============================================================================

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Track window position/size for saving on exit
        ctx.input(|i| {
            if let Some(rect) = i.viewport().outer_rect {
                self.window_pos = Some(rect.min);
            }
            if let Some(rect) = i.viewport().inner_rect {
                self.window_size = Some(rect.size());
            }
        });

        self.sync_theme(ctx);

        // Neutral spinner until the ambient theme is known
        let Some(mode) = self.theme.mode() else {
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.centered_and_justified(|ui| {
                    ui.add(egui::Spinner::new().size(48.0).color(theme::ACCENT_STRONG));
                });
            });
            return;
        };

        self.start_health_check(ctx);
        self.handle_dropped_files(ctx);
        self.poll_upload();

        let p = theme::palette(mode);
        let files_hovering = ctx.input(|i| !i.raw.hovered_files.is_empty());

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(p.bg_base))
            .show(ctx, |ui| {
                // Theme toggle pinned to the top-right corner
                let toggle_rect = egui::Rect::from_min_size(
                    egui::pos2(
                        ui.max_rect().right() - theme::TOGGLE_SIZE - theme::SPACING_XL,
                        ui.max_rect().top() + theme::SPACING_XL,
                    ),
                    egui::vec2(theme::TOGGLE_SIZE, theme::TOGGLE_SIZE),
                );
                let toggled = ui
                    .allocate_new_ui(egui::UiBuilder::new().max_rect(toggle_rect), |ui| {
                        components::theme_toggle(ui, mode)
                    })
                    .inner;
                if toggled {
                    self.toggle_theme(ctx);
                }

                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        ui.vertical_centered(|ui| {
                            let width = ui.available_width().min(theme::CONTENT_MAX_WIDTH);
                            ui.set_max_width(width);
                            ui.add_space(theme::SPACING_XXL);
                            self.render_header(ui, p);
                            ui.add_space(theme::SPACING_XL);
                            self.render_upload_card(ui, ctx, mode, files_hovering);
                            self.render_results(ui, p);
                            ui.add_space(theme::SPACING_XXL);
                        });
                    });
            });

        self.render_toast(ctx, p);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("Application shutting down");
        self.shutdown();
        self.save_settings();
    }
}

// ============================================================================
// VIEW RENDERING
// ============================================================================

impl App {
    fn render_header(&self, ui: &mut egui::Ui, p: &theme::Palette) {
        ui.label(
            egui::RichText::new(APP_NAME)
                .size(theme::FONT_DISPLAY)
                .strong()
                .color(theme::ACCENT),
        );
        ui.label(components::caption("Animal Detection System", p));
        ui.add_space(theme::SPACING_SM);
        components::status_badge(ui, self.backend_status(), p);
    }

    /// Drop zone, submit button and error banner
    fn render_upload_card(
        &mut self,
        ui: &mut egui::Ui,
        ctx: &egui::Context,
        mode: ThemeMode,
        files_hovering: bool,
    ) {
        let p = theme::palette(mode);
        let preview = self.preview_texture(ctx);
        let loading_image = self.upload.is_opening()
            || self.upload.selected().is_some_and(|s| s.preview_pending);
        let has_file = self.upload.selected().is_some();
        let state = self.upload.state();

        theme::card_frame(p).show(ui, |ui| {
            ui.set_width(ui.available_width());

            let content = match (&preview, has_file) {
                _ if loading_image => DropZoneContent::Loading,
                (Some(texture), _) => DropZoneContent::Preview(texture),
                (None, true) => DropZoneContent::NoPreview,
                (None, false) => DropZoneContent::Empty,
            };
            let zone = components::drop_zone(ui, p, content, files_hovering);
            if let Some(selected) = self.upload.selected() {
                ui.add_space(theme::SPACING_SM);
                ui.label(
                    egui::RichText::new(&selected.file.file_name)
                        .size(theme::FONT_SMALL)
                        .color(p.text_muted),
                );
            }
            if zone.clicked() {
                self.pick_file();
            }

            ui.add_space(theme::SPACING_LG);

            let loading = state.is_loading();
            let label = if loading { "Analyzing..." } else { "Identify Animal" };
            let clicked = components::action_button(ui, label, self.upload.can_submit(), loading, mode)
                .clicked();
            if clicked {
                self.submit();
            }

            if let Some(message) = state.error() {
                ui.add_space(theme::SPACING_LG);
                theme::error_frame(p).show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.vertical_centered(|ui| {
                        ui.label(
                            egui::RichText::new(message)
                                .size(theme::FONT_LABEL)
                                .strong()
                                .color(p.error_text),
                        );
                    });
                });
            }
        });
    }

    /// Headline, confidence and ranked bars for a successful prediction
    fn render_results(&mut self, ui: &mut egui::Ui, p: &theme::Palette) {
        let state = self.upload.state();
        let Some(result) = state.result() else {
            return;
        };
        let view = self.result_views.view_for(result);

        ui.add_space(theme::SPACING_XL);
        theme::card_frame(p).show(ui, |ui| {
            ui.set_width(ui.available_width());

            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.label(components::caption("Prediction", p));
                    ui.label(
                        egui::RichText::new(&view.headline)
                            .size(theme::FONT_RESULT)
                            .strong()
                            .color(theme::ACCENT_SUCCESS),
                    );
                });
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                    ui.vertical(|ui| {
                        ui.label(components::caption("Confidence", p));
                        ui.label(
                            egui::RichText::new(&view.confidence)
                                .size(theme::FONT_CONFIDENCE)
                                .monospace()
                                .strong()
                                .color(p.text_primary),
                        );
                    });
                });
            });

            ui.add_space(theme::SPACING_MD);
            ui.separator();
            ui.add_space(theme::SPACING_MD);

            for (rank, bar) in view.bars.iter().enumerate() {
                components::prediction_bar(ui, rank, bar, p);
                ui.add_space(theme::SPACING_LG);
            }
        });
    }

    fn render_toast(&mut self, ctx: &egui::Context, p: &theme::Palette) {
        let (Some(message), Some(start)) = (&self.toast_message, self.toast_start) else {
            return;
        };
        if start.elapsed() > std::time::Duration::from_secs(4) {
            self.toast_message = None;
            self.toast_start = None;
            return;
        }

        egui::Area::new(egui::Id::new("toast"))
            .anchor(egui::Align2::CENTER_BOTTOM, egui::vec2(0.0, -theme::SPACING_XL))
            .show(ctx, |ui| {
                theme::error_frame(p).show(ui, |ui| {
                    ui.label(
                        egui::RichText::new(message)
                            .size(theme::FONT_LABEL)
                            .color(p.error_text),
                    );
                });
            });
        ctx.request_repaint_after(std::time::Duration::from_millis(250));
    }
}

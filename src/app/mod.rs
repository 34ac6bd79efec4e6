//! App module - contains the main application state and logic

pub mod preview;
pub mod results;
pub mod theme_state;
pub mod upload;

use crate::api::{ClassifierApi, HttpClassifier};
use crate::constants::*;
use crate::settings::Settings;
use crate::types::*;
use eframe::egui;
use preview::PreviewRegistry;
use results::ResultViewCache;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use theme_state::{SystemThemeSignal, ThemeSession};
use tracing::{debug, info, warn};
use upload::{OpenOutcome, UploadController};

// ============================================================================
// APP STATE
// ============================================================================

pub struct App {
    pub(crate) upload: UploadController<HttpClassifier>,
    pub(crate) previews: PreviewRegistry,
    // Texture for the current preview, keyed by preview id
    pub(crate) preview_texture: Option<(u64, egui::TextureHandle)>,
    pub(crate) result_views: ResultViewCache,
    // Theme
    pub(crate) theme_signal: SystemThemeSignal,
    pub(crate) theme: ThemeSession,
    pub(crate) applied_theme: Option<ThemeMode>,
    // Backend health
    pub(crate) backend_status: Arc<Mutex<BackendStatus>>,
    pub(crate) health_check_started: bool,
    // Toast notification
    pub(crate) toast_message: Option<String>,
    pub(crate) toast_start: Option<std::time::Instant>,
    // Settings
    pub(crate) settings: Settings,
    pub(crate) data_dir: PathBuf,
    pub(crate) window_pos: Option<egui::Pos2>,
    pub(crate) window_size: Option<egui::Vec2>,
    pub(crate) runtime: tokio::runtime::Runtime,
}

// ============================================================================
// APP INITIALIZATION & HELPERS
// ============================================================================

impl App {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings: Settings,
        data_dir: PathBuf,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        // Add Phosphor icons font
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        let runtime = tokio::runtime::Runtime::new()?;

        let timeout = settings.request_timeout();
        let api = match HttpClassifier::new(&settings.endpoint, timeout) {
            Ok(api) => api,
            Err(e) => {
                warn!(error = %e, endpoint = %settings.endpoint, "Invalid endpoint, using default");
                HttpClassifier::new(DEFAULT_ENDPOINT, timeout)?
            }
        };
        info!(
            endpoint = %api.endpoint(),
            timeout_secs = timeout.as_secs(),
            success_delay_ms = settings.success_delay().as_millis() as u64,
            "Classifier configured"
        );

        let previews = PreviewRegistry::new();
        let repaint_ctx = cc.egui_ctx.clone();
        let upload = UploadController::new(api, runtime.handle().clone(), previews.clone())
            .with_success_delay(settings.success_delay())
            .with_repaint(move || repaint_ctx.request_repaint());

        let theme_signal = SystemThemeSignal::new();
        let theme = ThemeSession::attach(&theme_signal);

        Ok(Self {
            upload,
            previews,
            preview_texture: None,
            result_views: ResultViewCache::default(),
            theme_signal,
            theme,
            applied_theme: None,
            backend_status: Arc::new(Mutex::new(BackendStatus::Checking)),
            health_check_started: false,
            toast_message: None,
            toast_start: None,
            settings,
            data_dir,
            window_pos: None,
            window_size: None,
            runtime,
        })
    }

    pub fn save_settings(&self) {
        let settings = Settings {
            window_x: self.window_pos.map(|p| p.x),
            window_y: self.window_pos.map(|p| p.y),
            window_w: self.window_size.map(|s| s.x),
            window_h: self.window_size.map(|s| s.y),
            ..self.settings.clone()
        };
        settings.save(&self.data_dir);
    }

    /// Open the native picker and select the chosen file
    pub fn pick_file(&mut self) {
        let picked = rfd::FileDialog::new()
            .set_title("Select an image")
            .set_directory(self.settings.last_directory_or_default())
            .add_filter("Images", IMAGE_EXTENSIONS)
            .add_filter("All files", &["*"])
            .pick_file();

        match picked {
            Some(path) => self.load_selected_file(&path),
            None => debug!("File picker dismissed"),
        }
    }

    /// Select the first file dropped onto the window this frame
    pub fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped: Vec<egui::DroppedFile> = ctx.input(|i| i.raw.dropped_files.clone());
        let Some(file) = dropped.into_iter().next() else {
            return;
        };

        if let Some(path) = file.path {
            self.load_selected_file(&path);
        } else if let Some(bytes) = file.bytes {
            // Platforms without paths hand over the contents directly
            let name = if file.name.is_empty() { "dropped-image".to_string() } else { file.name };
            self.select(ImageFile::from_bytes(Path::new(&name), bytes));
        }
    }

    /// Read the file in the background; `poll_upload` finishes the selection
    pub fn load_selected_file(&mut self, path: &Path) {
        self.upload.open_path(path.to_path_buf());
    }

    fn select(&mut self, file: ImageFile) {
        self.clear_views();
        self.upload.select_file(file);
    }

    fn clear_views(&mut self) {
        // Drop the old texture together with the old preview
        self.preview_texture = None;
        self.result_views.clear();
    }

    /// Apply finished background reads and decodes
    pub fn poll_upload(&mut self) {
        match self.upload.poll() {
            Some(OpenOutcome::Selected) => {
                self.clear_views();
                let dir = self
                    .upload
                    .selected()
                    .and_then(|s| s.file.path.parent())
                    .map(|dir| dir.to_string_lossy().to_string());
                if dir.is_some() {
                    self.settings.last_directory = dir;
                }
            }
            Some(OpenOutcome::Failed { path, .. }) => {
                self.show_toast(format!("Could not read {}", path.display()));
            }
            None => {}
        }
    }

    pub fn submit(&mut self) {
        // The controller ignores this while loading or without a file
        if self.upload.submit().is_none() {
            debug!("Submit ignored");
        }
    }

    /// Texture for the selected file's preview, uploaded on first use
    pub fn preview_texture(&mut self, ctx: &egui::Context) -> Option<egui::TextureHandle> {
        let preview = self.upload.selected()?.preview.as_ref()?;
        let id = preview.id();

        if let Some((cached_id, texture)) = &self.preview_texture {
            if *cached_id == id {
                return Some(texture.clone());
            }
        }

        let image = preview.image()?;
        let texture = ctx.load_texture(
            format!("preview-{}", id),
            egui::ColorImage::from_rgba_unmultiplied(image.size, &image.rgba),
            egui::TextureOptions::LINEAR,
        );
        self.preview_texture = Some((id, texture.clone()));
        Some(texture)
    }

    /// Ping the backend once in the background
    pub fn start_health_check(&mut self, ctx: &egui::Context) {
        if self.health_check_started {
            return;
        }
        self.health_check_started = true;

        let api = self.upload.api().clone();
        let status = self.backend_status.clone();
        let ctx = ctx.clone();

        self.runtime.spawn(async move {
            let next = match api.health().await {
                Ok(health) => {
                    info!(status = %health.status, model_loaded = health.model_loaded, "Backend health");
                    BackendStatus::from_health(&health)
                }
                Err(e) => {
                    warn!(kind = e.kind(), error = %e, "Backend health check failed");
                    BackendStatus::Offline
                }
            };
            *status.lock().unwrap_or_else(|e| e.into_inner()) = next;
            ctx.request_repaint();
        });
    }

    pub fn backend_status(&self) -> BackendStatus {
        *self.backend_status.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Feed the platform preference into the session and restyle on change
    pub fn sync_theme(&mut self, ctx: &egui::Context) {
        let ambient = ctx.system_theme().map(ThemeMode::from).unwrap_or(ThemeMode::Dark);
        self.theme_signal.publish(ambient);
        self.theme.poll();
        self.apply_theme(ctx);
    }

    pub fn toggle_theme(&mut self, ctx: &egui::Context) {
        self.theme.toggle();
        self.apply_theme(ctx);
    }

    fn apply_theme(&mut self, ctx: &egui::Context) {
        let Some(mode) = self.theme.mode() else {
            return;
        };
        if self.applied_theme != Some(mode) {
            debug!(?mode, overridden = self.theme.is_overridden(), "Applying theme");
            crate::theme::apply_visuals(ctx, mode);
            self.applied_theme = Some(mode);
        }
    }

    pub fn show_toast(&mut self, message: String) {
        self.toast_message = Some(message);
        self.toast_start = Some(std::time::Instant::now());
    }

    pub fn shutdown(&mut self) {
        self.upload.shutdown();
        self.theme.detach();
        self.preview_texture = None;
        debug!(
            live_previews = self.previews.live_count(),
            theme_subscribers = self.theme_signal.subscriber_count(),
            "Session torn down"
        );
    }
}

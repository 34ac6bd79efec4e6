//! Common types and data structures

use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A file picked by the user, read fully into memory
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub path: PathBuf,
    pub file_name: String,
    pub mime: String,
    pub bytes: Arc<[u8]>,
}

impl ImageFile {
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        Ok(Self::from_bytes(path, bytes))
    }

    pub fn from_bytes(path: &Path, bytes: impl Into<Arc<[u8]>>) -> Self {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        // Guessed from the extension only; the backend does the real validation
        let mime = image::ImageFormat::from_path(path)
            .map(|f| f.to_mime_type().to_string())
            .unwrap_or_else(|_| "application/octet-stream".to_string());
        Self {
            path: path.to_path_buf(),
            file_name,
            mime,
            bytes: bytes.into(),
        }
    }
}

/// One ranked entry of a prediction
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct TopPrediction {
    pub animal: String,
    pub probability: String, // display string, e.g. "91.20%"
}

/// Prediction payload returned by the classification endpoint
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct PredictionResult {
    pub predicted_class: String,
    pub confidence: String,
    /// Exactly three entries, highest first. Any other length fails to decode.
    pub top_3_predictions: [TopPrediction; 3],
}

/// Lifecycle of one submission
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Loading,
    Succeeded(Arc<PredictionResult>),
    Failed(String),
}

impl RequestState {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading)
    }

    pub fn result(&self) -> Option<&Arc<PredictionResult>> {
        match self {
            RequestState::Succeeded(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            RequestState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Dark or light display mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Dark,
    Light,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        }
    }

    pub fn is_dark(self) -> bool {
        self == ThemeMode::Dark
    }
}

impl From<egui::Theme> for ThemeMode {
    fn from(theme: egui::Theme) -> Self {
        match theme {
            egui::Theme::Dark => ThemeMode::Dark,
            egui::Theme::Light => ThemeMode::Light,
        }
    }
}

impl From<ThemeMode> for egui::Theme {
    fn from(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => egui::Theme::Dark,
            ThemeMode::Light => egui::Theme::Light,
        }
    }
}

/// Health endpoint response
#[derive(Debug, Clone, serde::Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub model_loaded: bool,
}

/// Backend availability as shown in the header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendStatus {
    #[default]
    Checking,
    Online,
    ModelMissing,
    Offline,
}

impl BackendStatus {
    pub fn from_health(health: &HealthStatus) -> Self {
        if !health.status.eq_ignore_ascii_case("online") {
            BackendStatus::Offline
        } else if health.model_loaded {
            BackendStatus::Online
        } else {
            BackendStatus::ModelMissing
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BackendStatus::Checking => "Checking backend...",
            BackendStatus::Online => "Backend online",
            BackendStatus::ModelMissing => "Model not loaded",
            BackendStatus::Offline => "Backend offline",
        }
    }
}

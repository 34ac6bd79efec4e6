//! Application constants and configuration defaults

use std::time::Duration;

pub const APP_NAME: &str = "AI Vision";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_ENDPOINT: &str = "https://iazishan-animal-detector-backend.hf.space/predict";
/// Overrides the configured endpoint for one session
pub const ENDPOINT_ENV_VAR: &str = "AI_VISION_ENDPOINT";

/// Multipart field the backend reads the image from
pub const UPLOAD_FIELD_NAME: &str = "file";

/// Shown for every failed submission; details only go to the log
pub const GENERIC_ERROR_MESSAGE: &str = "Server Error: Make sure backend is running!";

/// Minimum time a successful result stays hidden behind the loading state
pub const DEFAULT_SUCCESS_DELAY: Duration = Duration::from_millis(800);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
pub const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// Extensions offered by the picker's image filter (advisory only)
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "bmp"];

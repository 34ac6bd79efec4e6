//! Upload lifecycle: file selection, submission and the request state machine
//!
//! Reading a picked file and decoding its preview run on the runtime's
//! blocking pool. Finished work is parked in the shared slot and picked up
//! on the UI thread by [`UploadController::poll`].

use super::preview::{PreviewImage, PreviewRef, PreviewRegistry};
use crate::api::ClassifierApi;
use crate::constants::GENERIC_ERROR_MESSAGE;
use crate::error::ClassifyError;
use crate::types::{ImageFile, RequestState};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Called from background tasks whenever there is something new to show
pub type RepaintFn = Arc<dyn Fn() + Send + Sync>;

/// The user's current pick and its on-screen preview
#[derive(Debug)]
pub struct SelectedImage {
    pub file: ImageFile,
    /// `None` while decoding, or when the file could not be decoded locally
    pub preview: Option<PreviewRef>,
    pub preview_pending: bool,
}

/// What became of an [`UploadController::open_path`] call
#[derive(Debug)]
pub enum OpenOutcome {
    Selected,
    Failed {
        path: PathBuf,
        error: std::io::Error,
    },
}

struct Shared {
    state: RequestState,
    // Request completions from older generations are dropped
    generation: u64,
    // Preview decodes for older selections are dropped
    selection: u64,
    // File reads superseded by a newer open or selection are dropped
    read: u64,
    opened: Option<(PathBuf, std::io::Result<ImageFile>)>,
    preview: Option<Option<PreviewRef>>,
}

pub struct UploadController<A: ClassifierApi> {
    api: Arc<A>,
    runtime: Handle,
    previews: PreviewRegistry,
    selected: Option<SelectedImage>,
    opening: Option<PathBuf>,
    shared: Arc<Mutex<Shared>>,
    success_delay: Duration,
    repaint: RepaintFn,
    cancel_token: Option<CancellationToken>,
}

impl<A: ClassifierApi> UploadController<A> {
    pub fn new(api: A, runtime: Handle, previews: PreviewRegistry) -> Self {
        Self {
            api: Arc::new(api),
            runtime,
            previews,
            selected: None,
            opening: None,
            shared: Arc::new(Mutex::new(Shared {
                state: RequestState::Idle,
                generation: 0,
                selection: 0,
                read: 0,
                opened: None,
                preview: None,
            })),
            success_delay: Duration::ZERO,
            repaint: Arc::new(|| {}),
            cancel_token: None,
        }
    }

    /// Hold successful results back for at least `delay` after the response
    pub fn with_success_delay(mut self, delay: Duration) -> Self {
        self.success_delay = delay;
        self
    }

    pub fn with_repaint(mut self, repaint: impl Fn() + Send + Sync + 'static) -> Self {
        self.repaint = Arc::new(repaint);
        self
    }

    pub fn api(&self) -> &Arc<A> {
        &self.api
    }

    pub fn state(&self) -> RequestState {
        lock(&self.shared).state.clone()
    }

    pub fn selected(&self) -> Option<&SelectedImage> {
        self.selected.as_ref()
    }

    /// A file is being read from disk
    pub fn is_opening(&self) -> bool {
        self.opening.is_some()
    }

    pub fn can_submit(&self) -> bool {
        self.selected.is_some() && self.opening.is_none() && !lock(&self.shared).state.is_loading()
    }

    /// Read `path` in the background. The current selection and request
    /// state stay untouched until the read succeeds; see [`Self::poll`].
    pub fn open_path(&mut self, path: PathBuf) -> JoinHandle<()> {
        let read = {
            let mut shared = lock(&self.shared);
            shared.read += 1;
            shared.opened = None;
            shared.read
        };
        debug!(path = %path.display(), read, "Reading image");
        self.opening = Some(path.clone());

        let shared = self.shared.clone();
        let repaint = self.repaint.clone();
        self.runtime.spawn_blocking(move || {
            let result = ImageFile::from_path(&path);
            {
                let mut shared = lock(&shared);
                if shared.read != read {
                    debug!(path = %path.display(), "Discarding superseded read");
                    return;
                }
                shared.opened = Some((path, result));
            }
            repaint();
        })
    }

    /// Replace the current selection. Clears any result or error, abandons
    /// a request that is still in flight and starts decoding the preview.
    pub fn select_file(&mut self, file: ImageFile) -> JoinHandle<()> {
        info!(
            file = %file.file_name,
            path = %file.path.display(),
            mime = %file.mime,
            bytes = file.bytes.len(),
            "Image selected"
        );

        let selection = self.invalidate();
        let bytes = file.bytes.clone();
        // Old preview is released here
        self.selected = Some(SelectedImage {
            file,
            preview: None,
            preview_pending: true,
        });

        let shared = self.shared.clone();
        let previews = self.previews.clone();
        let repaint = self.repaint.clone();
        self.runtime.spawn_blocking(move || {
            let decoded = PreviewImage::decode(&bytes);
            {
                let mut shared = lock(&shared);
                if shared.selection != selection {
                    debug!(selection, "Discarding preview for replaced selection");
                    return;
                }
                if decoded.is_none() {
                    debug!(selection, "No local preview for selection");
                }
                shared.preview = Some(decoded.map(|img| previews.acquire(img)));
            }
            repaint();
        })
    }

    /// Pick up finished reads and decodes. Called once per frame.
    pub fn poll(&mut self) -> Option<OpenOutcome> {
        let (opened, preview) = {
            let mut shared = lock(&self.shared);
            (shared.opened.take(), shared.preview.take())
        };

        if let (Some(preview), Some(selected)) = (preview, self.selected.as_mut()) {
            selected.preview = preview;
            selected.preview_pending = false;
        }

        let (path, result) = opened?;
        self.opening = None;
        match result {
            Ok(file) => {
                self.select_file(file);
                Some(OpenOutcome::Selected)
            }
            Err(error) => {
                warn!(error = %error, path = %path.display(), "Failed to read selected file");
                Some(OpenOutcome::Failed { path, error })
            }
        }
    }

    /// Start a classification request for the selected file.
    ///
    /// Returns `None` without touching any state when nothing is selected,
    /// a file is still being read, or a request is already loading.
    pub fn submit(&mut self) -> Option<JoinHandle<()>> {
        if self.opening.is_some() {
            debug!("Submit ignored, file still being read");
            return None;
        }
        let file = self.selected.as_ref()?.file.clone();

        let generation = {
            let mut shared = lock(&self.shared);
            if shared.state.is_loading() {
                debug!("Submit ignored, request already in flight");
                return None;
            }
            shared.generation += 1;
            shared.state = RequestState::Loading;
            shared.generation
        };

        info!(file = %file.file_name, generation, "Submitting image");

        let token = CancellationToken::new();
        self.cancel_token = Some(token.clone());

        let submission = Submission {
            api: self.api.clone(),
            shared: self.shared.clone(),
            repaint: self.repaint.clone(),
            success_delay: self.success_delay,
            generation,
            token,
        };
        Some(self.runtime.spawn(submission.run(file)))
    }

    /// Teardown: abandon all background work and release the preview
    pub fn shutdown(&mut self) {
        self.invalidate();
        self.selected = None;
    }

    /// Cancel the in-flight request and orphan every pending read and decode.
    /// Returns the new selection counter.
    fn invalidate(&mut self) -> u64 {
        self.cancel_in_flight();
        self.opening = None;
        let mut shared = lock(&self.shared);
        shared.generation += 1;
        shared.selection += 1;
        shared.read += 1;
        shared.state = RequestState::Idle;
        shared.opened = None;
        shared.preview = None;
        shared.selection
    }

    fn cancel_in_flight(&mut self) {
        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }
    }
}

impl<A: ClassifierApi> Drop for UploadController<A> {
    fn drop(&mut self) {
        self.cancel_in_flight();
    }
}

fn lock(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(|e| e.into_inner())
}

/// Everything the background task needs for one request
struct Submission<A: ClassifierApi> {
    api: Arc<A>,
    shared: Arc<Mutex<Shared>>,
    repaint: RepaintFn,
    success_delay: Duration,
    generation: u64,
    token: CancellationToken,
}

impl<A: ClassifierApi> Submission<A> {
    async fn run(self, file: ImageFile) {
        let file_name = file.file_name.clone();
        let outcome = tokio::select! {
            _ = self.token.cancelled() => Err(ClassifyError::Cancelled),
            result = self.api.classify(file) => result,
        };

        let next = match outcome {
            Ok(result) => {
                info!(
                    file = %file_name,
                    class = %result.predicted_class,
                    confidence = %result.confidence,
                    "Prediction received"
                );
                if !self.success_delay.is_zero() {
                    tokio::select! {
                        _ = self.token.cancelled() => return,
                        _ = tokio::time::sleep(self.success_delay) => {}
                    }
                }
                RequestState::Succeeded(Arc::new(result))
            }
            Err(ClassifyError::Cancelled) => {
                debug!(file = %file_name, generation = self.generation, "Request cancelled");
                return;
            }
            Err(e) => {
                warn!(file = %file_name, kind = e.kind(), error = %e, "Classification failed");
                RequestState::Failed(GENERIC_ERROR_MESSAGE.to_string())
            }
        };

        {
            let mut shared = lock(&self.shared);
            if shared.generation != self.generation {
                debug!(
                    generation = self.generation,
                    current = shared.generation,
                    "Discarding stale response"
                );
                return;
            }
            shared.state = next;
        }
        (self.repaint)();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::HttpClassifier;
    use crate::app::preview::tiny_png;
    use crate::error::Result;
    use crate::types::{HealthStatus, PredictionResult, TopPrediction};
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::net::TcpListener;
    use tokio::sync::Notify;

    enum Reply {
        Ok(PredictionResult),
        Status(u16),
        Malformed,
    }

    struct FakeApi {
        calls: AtomicUsize,
        reply: Reply,
        gate: Option<Arc<Notify>>,
    }

    impl FakeApi {
        fn new(reply: Reply) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                reply,
                gate: None,
            }
        }

        fn gated(reply: Reply, gate: Arc<Notify>) -> Self {
            Self {
                gate: Some(gate),
                ..Self::new(reply)
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl ClassifierApi for FakeApi {
        async fn classify(&self, _image: ImageFile) -> Result<PredictionResult> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            match &self.reply {
                Reply::Ok(result) => Ok(result.clone()),
                Reply::Status(code) => Err(ClassifyError::Status {
                    status: reqwest::StatusCode::from_u16(*code).unwrap(),
                    body: "boom".into(),
                }),
                Reply::Malformed => {
                    Err(serde_json::from_str::<PredictionResult>("{").unwrap_err().into())
                }
            }
        }

        async fn health(&self) -> Result<HealthStatus> {
            Ok(HealthStatus {
                status: "Online".into(),
                model_loaded: true,
            })
        }
    }

    fn tiger() -> PredictionResult {
        let entry = |animal: &str, probability: &str| TopPrediction {
            animal: animal.into(),
            probability: probability.into(),
        };
        PredictionResult {
            predicted_class: "tiger".into(),
            confidence: "91.20%".into(),
            top_3_predictions: [
                entry("tiger", "91.20%"),
                entry("leopard", "5.10%"),
                entry("lion", "3.70%"),
            ],
        }
    }

    fn png_file(name: &str) -> ImageFile {
        ImageFile::from_bytes(Path::new(name), tiny_png())
    }

    fn controller<A: ClassifierApi>(api: A) -> UploadController<A> {
        UploadController::new(api, Handle::current(), PreviewRegistry::new())
    }

    #[tokio::test]
    async fn test_submit_without_file_is_noop() {
        let mut ctl = controller(FakeApi::new(Reply::Ok(tiger())));
        assert!(!ctl.can_submit());
        assert!(ctl.submit().is_none());
        assert_eq!(ctl.state(), RequestState::Idle);
        assert_eq!(ctl.api().calls(), 0);
    }

    #[tokio::test]
    async fn test_successful_submission() {
        let repaints = Arc::new(AtomicUsize::new(0));
        let counter = repaints.clone();
        let mut ctl = controller(FakeApi::new(Reply::Ok(tiger()))).with_repaint(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        ctl.select_file(png_file("tiger.png")).await.unwrap();
        ctl.poll();
        assert!(ctl.can_submit());
        let before = repaints.load(Ordering::SeqCst);

        let handle = ctl.submit().unwrap();
        assert_eq!(ctl.state(), RequestState::Loading);
        assert!(!ctl.can_submit());

        handle.await.unwrap();
        let state = ctl.state();
        let result = state.result().unwrap();
        assert_eq!(result.predicted_class, "tiger");
        assert_eq!(result.confidence, "91.20%");
        assert!(ctl.can_submit());
        assert_eq!(repaints.load(Ordering::SeqCst), before + 1);
    }

    #[tokio::test]
    async fn test_second_submit_while_loading_is_suppressed() {
        let gate = Arc::new(Notify::new());
        let mut ctl = controller(FakeApi::gated(Reply::Ok(tiger()), gate.clone()));
        ctl.select_file(png_file("a.png"));

        let handle = ctl.submit().unwrap();
        assert!(ctl.submit().is_none());
        assert!(ctl.submit().is_none());

        gate.notify_one();
        handle.await.unwrap();
        assert_eq!(ctl.api().calls(), 1);
        assert!(ctl.state().result().is_some());
    }

    #[tokio::test]
    async fn test_server_error_becomes_generic_failure() {
        let mut ctl = controller(FakeApi::new(Reply::Status(502)));
        ctl.select_file(png_file("a.png"));
        ctl.submit().unwrap().await.unwrap();

        assert_eq!(ctl.state(), RequestState::Failed(GENERIC_ERROR_MESSAGE.to_string()));
        assert!(ctl.can_submit());
    }

    #[tokio::test]
    async fn test_malformed_payload_becomes_generic_failure() {
        let mut ctl = controller(FakeApi::new(Reply::Malformed));
        ctl.select_file(png_file("a.png"));
        ctl.submit().unwrap().await.unwrap();

        let state = ctl.state();
        assert_eq!(state.error(), Some(GENERIC_ERROR_MESSAGE));
        assert!(!GENERIC_ERROR_MESSAGE.is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_fails_and_reenables_submit() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let api = HttpClassifier::new(&format!("http://{}/predict", addr), Duration::from_secs(5))
            .unwrap();

        let mut ctl = controller(api);
        ctl.select_file(png_file("a.png"));
        ctl.submit().unwrap().await.unwrap();

        assert_eq!(ctl.state().error(), Some(GENERIC_ERROR_MESSAGE));
        assert!(ctl.can_submit());
    }

    #[tokio::test]
    async fn test_request_timeout_fails_and_reenables_submit() {
        // Accepts the connection but never answers
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(30)).await;
        });
        let api = HttpClassifier::new(&format!("http://{}/predict", addr), Duration::from_secs(1))
            .unwrap();

        let mut ctl = controller(api);
        ctl.select_file(png_file("a.png"));
        let started = std::time::Instant::now();
        ctl.submit().unwrap().await.unwrap();

        assert!(started.elapsed() < Duration::from_secs(10));
        assert_eq!(ctl.state(), RequestState::Failed(GENERIC_ERROR_MESSAGE.to_string()));
        assert!(ctl.can_submit());
    }

    #[tokio::test]
    async fn test_shutdown_cancels_in_flight_request() {
        let repaints = Arc::new(AtomicUsize::new(0));
        let counter = repaints.clone();
        let gate = Arc::new(Notify::new());
        let mut ctl = controller(FakeApi::gated(Reply::Ok(tiger()), gate.clone())).with_repaint(
            move || {
                counter.fetch_add(1, Ordering::SeqCst);
            },
        );
        ctl.select_file(png_file("a.png")).await.unwrap();
        ctl.poll();
        let before = repaints.load(Ordering::SeqCst);

        let handle = ctl.submit().unwrap();
        ctl.shutdown();
        gate.notify_one();
        handle.await.unwrap();

        assert_eq!(repaints.load(Ordering::SeqCst), before);
        assert_eq!(ctl.state(), RequestState::Idle);
        assert!(ctl.state().result().is_none());
        assert!(!ctl.can_submit());
    }

    #[tokio::test]
    async fn test_new_selection_clears_result_and_error() {
        let mut ctl = controller(FakeApi::new(Reply::Ok(tiger())));
        ctl.select_file(png_file("a.png"));
        ctl.submit().unwrap().await.unwrap();
        assert!(ctl.state().result().is_some());

        ctl.select_file(png_file("b.png"));
        assert_eq!(ctl.state(), RequestState::Idle);
        assert_eq!(ctl.selected().unwrap().file.file_name, "b.png");

        let mut failing = controller(FakeApi::new(Reply::Status(500)));
        failing.select_file(png_file("a.png"));
        failing.submit().unwrap().await.unwrap();
        assert!(failing.state().error().is_some());

        failing.select_file(png_file("a.png"));
        assert_eq!(failing.state(), RequestState::Idle);
        assert_eq!(failing.api().calls(), 1);
    }

    #[tokio::test]
    async fn test_reselect_during_loading_discards_stale_response() {
        let gate = Arc::new(Notify::new());
        let mut ctl = controller(FakeApi::gated(Reply::Ok(tiger()), gate.clone()));
        ctl.select_file(png_file("a.png"));
        let handle = ctl.submit().unwrap();

        ctl.select_file(png_file("b.png"));
        assert_eq!(ctl.state(), RequestState::Idle);
        assert!(ctl.can_submit());

        gate.notify_one();
        handle.await.unwrap();
        assert_eq!(ctl.state(), RequestState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_is_held_for_display_delay() {
        let mut ctl = controller(FakeApi::new(Reply::Ok(tiger())))
            .with_success_delay(Duration::from_millis(800));
        ctl.select_file(png_file("a.png"));
        let handle = ctl.submit().unwrap();

        tokio::time::sleep(Duration::from_millis(400)).await;
        assert_eq!(ctl.state(), RequestState::Loading);

        handle.await.unwrap();
        assert!(ctl.state().result().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_is_not_delayed() {
        let mut ctl = controller(FakeApi::new(Reply::Status(500)))
            .with_success_delay(Duration::from_millis(800));
        ctl.select_file(png_file("a.png"));
        let handle = ctl.submit().unwrap();

        tokio::time::sleep(Duration::from_millis(1)).await;
        assert!(ctl.state().error().is_some());
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_preview_decodes_off_thread_and_attaches_on_poll() {
        let registry = PreviewRegistry::new();
        let mut ctl = UploadController::new(
            FakeApi::new(Reply::Ok(tiger())),
            Handle::current(),
            registry.clone(),
        );

        let decode = ctl.select_file(png_file("a.png"));
        let selected = ctl.selected().unwrap();
        assert!(selected.preview_pending);
        assert!(selected.preview.is_none());
        assert!(ctl.can_submit());

        decode.await.unwrap();
        assert!(ctl.poll().is_none());
        let selected = ctl.selected().unwrap();
        assert!(!selected.preview_pending);
        let preview = selected.preview.as_ref().unwrap();
        assert_eq!(preview.image().unwrap().size, [4, 2]);
        assert_eq!(registry.live_count(), 1);
    }

    #[tokio::test]
    async fn test_replaced_selection_never_gets_old_preview() {
        let registry = PreviewRegistry::new();
        let mut ctl = UploadController::new(
            FakeApi::new(Reply::Ok(tiger())),
            Handle::current(),
            registry.clone(),
        );

        let first = ctl.select_file(png_file("a.png"));
        let second = ctl.select_file(ImageFile::from_bytes(Path::new("b.txt"), b"text".to_vec()));
        first.await.unwrap();
        second.await.unwrap();
        ctl.poll();

        let selected = ctl.selected().unwrap();
        assert_eq!(selected.file.file_name, "b.txt");
        assert!(selected.preview.is_none());
        assert!(!selected.preview_pending);
        assert_eq!(registry.live_count(), 0);
    }

    #[tokio::test]
    async fn test_previews_released_on_reselect_and_shutdown() {
        let registry = PreviewRegistry::new();
        let mut ctl = UploadController::new(
            FakeApi::new(Reply::Ok(tiger())),
            Handle::current(),
            registry.clone(),
        );

        for i in 0..5 {
            ctl.select_file(png_file(&format!("{}.png", i))).await.unwrap();
            ctl.poll();
            assert_eq!(registry.live_count(), 1);
        }
        assert!(ctl.selected().unwrap().preview.is_some());

        ctl.shutdown();
        assert!(ctl.selected().is_none());
        assert_eq!(registry.live_count(), 0);
    }

    #[tokio::test]
    async fn test_shutdown_orphans_pending_decode() {
        let registry = PreviewRegistry::new();
        let mut ctl = UploadController::new(
            FakeApi::new(Reply::Ok(tiger())),
            Handle::current(),
            registry.clone(),
        );

        let decode = ctl.select_file(png_file("a.png"));
        ctl.shutdown();
        decode.await.unwrap();
        assert!(ctl.poll().is_none());
        assert!(ctl.selected().is_none());
        assert_eq!(registry.live_count(), 0);
    }

    #[tokio::test]
    async fn test_non_image_file_is_selectable_without_preview() {
        let mut ctl = controller(FakeApi::new(Reply::Status(415)));
        ctl.select_file(ImageFile::from_bytes(Path::new("notes.txt"), b"hello".to_vec()))
            .await
            .unwrap();
        ctl.poll();

        let selected = ctl.selected().unwrap();
        assert!(selected.preview.is_none());
        assert!(!selected.preview_pending);
        assert!(ctl.can_submit());

        ctl.submit().unwrap().await.unwrap();
        assert_eq!(ctl.state().error(), Some(GENERIC_ERROR_MESSAGE));
    }

    #[tokio::test]
    async fn test_open_path_reads_in_background() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tiger.png");
        std::fs::write(&path, tiny_png()).unwrap();

        let mut ctl = controller(FakeApi::new(Reply::Ok(tiger())));
        let read = ctl.open_path(path.clone());
        assert!(ctl.is_opening());
        assert!(!ctl.can_submit());
        assert!(ctl.submit().is_none());

        read.await.unwrap();
        assert!(matches!(ctl.poll(), Some(OpenOutcome::Selected)));
        assert!(!ctl.is_opening());
        let selected = ctl.selected().unwrap();
        assert_eq!(selected.file.path, path);
        assert_eq!(selected.file.mime, "image/png");
        assert!(ctl.can_submit());
    }

    #[tokio::test]
    async fn test_failed_read_keeps_current_selection_and_state() {
        let mut ctl = controller(FakeApi::new(Reply::Ok(tiger())));
        ctl.select_file(png_file("a.png"));
        ctl.submit().unwrap().await.unwrap();

        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.png");
        ctl.open_path(missing.clone()).await.unwrap();

        match ctl.poll() {
            Some(OpenOutcome::Failed { path, .. }) => assert_eq!(path, missing),
            other => panic!("expected read failure, got {:?}", other),
        }
        assert!(ctl.state().result().is_some());
        assert_eq!(ctl.selected().unwrap().file.file_name, "a.png");
        assert!(ctl.can_submit());
    }

    #[tokio::test]
    async fn test_selection_supersedes_pending_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("old.png");
        std::fs::write(&path, tiny_png()).unwrap();

        let mut ctl = controller(FakeApi::new(Reply::Ok(tiger())));
        let read = ctl.open_path(path);
        ctl.select_file(png_file("dropped.png"));
        assert!(!ctl.is_opening());

        read.await.unwrap();
        assert!(ctl.poll().is_none());
        assert_eq!(ctl.selected().unwrap().file.file_name, "dropped.png");
    }
}

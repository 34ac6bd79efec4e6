//! HTTP implementation of the classifier API

use super::ClassifierApi;
use crate::constants::{APP_VERSION, HEALTH_CHECK_TIMEOUT, UPLOAD_FIELD_NAME};
use crate::error::{ClassifyError, Result};
use crate::types::{HealthStatus, ImageFile, PredictionResult};
use reqwest::multipart::{Form, Part};
use reqwest::Url;
use std::time::Duration;
use tracing::debug;

pub struct HttpClassifier {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpClassifier {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| ClassifyError::Endpoint(format!("{}: {}", endpoint, e)))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(ClassifyError::Endpoint(format!(
                "unsupported scheme '{}'",
                endpoint.scheme()
            )));
        }
        let client = reqwest::Client::builder()
            .user_agent(format!("ai-vision/{}", APP_VERSION))
            .timeout(timeout)
            .build()?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Root of the endpoint's origin, where the backend reports its status
    pub(crate) fn health_url(&self) -> Url {
        let mut url = self.endpoint.clone();
        url.set_path("/");
        url.set_query(None);
        url.set_fragment(None);
        url
    }
}

impl ClassifierApi for HttpClassifier {
    async fn classify(&self, image: ImageFile) -> Result<PredictionResult> {
        let part = Part::bytes(image.bytes.to_vec())
            .file_name(image.file_name.clone())
            .mime_str(&image.mime)?;
        let form = Form::new().part(UPLOAD_FIELD_NAME, part);

        debug!(
            url = %self.endpoint,
            file = %image.file_name,
            bytes = image.bytes.len(),
            "Posting image for classification"
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClassifyError::Status { status, body });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn health(&self) -> Result<HealthStatus> {
        let response = self
            .client
            .get(self.health_url())
            .timeout(HEALTH_CHECK_TIMEOUT)
            .send()
            .await?
            .error_for_status()?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Accept one connection, answer with `response`, return the raw request.
    async fn serve_once(response: String) -> (String, tokio::task::JoinHandle<Vec<u8>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
                if request_complete(&request) {
                    break;
                }
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            request
        });
        (format!("http://{}/predict", addr), handle)
    }

    fn request_complete(request: &[u8]) -> bool {
        let text = String::from_utf8_lossy(request);
        let Some(header_end) = text.find("\r\n\r\n") else {
            return false;
        };
        if text[..header_end].to_ascii_lowercase().contains("transfer-encoding: chunked") {
            return text.ends_with("0\r\n\r\n");
        }
        let content_length = text[..header_end]
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);
        request.len() >= header_end + 4 + content_length
    }

    fn http_response(status: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        )
    }

    fn sample_image() -> ImageFile {
        ImageFile::from_bytes(Path::new("tiger.png"), b"\x89PNG fake".to_vec())
    }

    const TIGER: &str = r#"{"predicted_class":"tiger","confidence":"91.20%","top_3_predictions":[{"animal":"tiger","probability":"91.20%"},{"animal":"leopard","probability":"5.10%"},{"animal":"lion","probability":"3.70%"}]}"#;

    #[tokio::test]
    async fn test_classify_posts_single_file_part() {
        let (url, server) = serve_once(http_response("200 OK", TIGER)).await;
        let api = HttpClassifier::new(&url, Duration::from_secs(5)).unwrap();

        let result = api.classify(sample_image()).await.unwrap();
        assert_eq!(result.predicted_class, "tiger");
        assert_eq!(result.top_3_predictions[0].probability, "91.20%");

        let request = String::from_utf8_lossy(&server.await.unwrap()).to_ascii_lowercase();
        assert!(request.starts_with("post /predict http/1.1"));
        assert!(request.contains("multipart/form-data; boundary="));
        assert!(request.contains(r#"name="file"; filename="tiger.png""#));
        assert!(request.contains("content-type: image/png"));
        assert_eq!(request.matches("content-disposition").count(), 1);
    }

    #[tokio::test]
    async fn test_classify_maps_non_success_status() {
        let body = r#"{"detail":"Model setup failed on server."}"#;
        let (url, _server) = serve_once(http_response("500 Internal Server Error", body)).await;
        let api = HttpClassifier::new(&url, Duration::from_secs(5)).unwrap();

        match api.classify(sample_image()).await {
            Err(ClassifyError::Status { status, body }) => {
                assert_eq!(status.as_u16(), 500);
                assert!(body.contains("Model setup failed"));
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_classify_rejects_malformed_json() {
        let (url, _server) = serve_once(http_response("200 OK", "{\"predicted_class\":")).await;
        let api = HttpClassifier::new(&url, Duration::from_secs(5)).unwrap();

        let err = api.classify(sample_image()).await.unwrap_err();
        assert_eq!(err.kind(), "decode");
    }

    #[tokio::test]
    async fn test_classify_unreachable_endpoint_is_network_error() {
        // Bind then drop to get a port nobody listens on
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let api = HttpClassifier::new(&format!("http://{}/predict", addr), Duration::from_secs(5))
            .unwrap();
        let err = api.classify(sample_image()).await.unwrap_err();
        assert!(matches!(err, ClassifyError::Network(_)));
    }

    #[tokio::test]
    async fn test_health_reads_status_route() {
        let body = r#"{"status":"Online","model_loaded":true}"#;
        let (url, server) = serve_once(http_response("200 OK", body)).await;
        let api = HttpClassifier::new(&url, Duration::from_secs(5)).unwrap();

        let health = api.health().await.unwrap();
        assert_eq!(health.status, "Online");
        assert!(health.model_loaded);

        let request = String::from_utf8_lossy(&server.await.unwrap()).into_owned();
        assert!(request.starts_with("GET / HTTP/1.1"));
    }

    #[test]
    fn test_health_url_strips_path_and_query() {
        let api = HttpClassifier::new(
            "https://example.hf.space/predict?x=1",
            Duration::from_secs(1),
        )
        .unwrap();
        assert_eq!(api.health_url().as_str(), "https://example.hf.space/");
        assert_eq!(api.endpoint().path(), "/predict");
    }

    #[test]
    fn test_rejects_invalid_endpoint() {
        assert!(matches!(
            HttpClassifier::new("not a url", Duration::from_secs(1)),
            Err(ClassifyError::Endpoint(_))
        ));
        assert!(matches!(
            HttpClassifier::new("ftp://example.com/predict", Duration::from_secs(1)),
            Err(ClassifyError::Endpoint(_))
        ));
    }
}

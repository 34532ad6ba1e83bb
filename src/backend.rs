//! Transport to the chart server.
//!
//! [`ChartBackend`] is the seam between the session and the network: it sends an encoded
//! request and hands back the parsed JSON body. Deciding whether that body is a success
//! is left to [`crate::request`].

use crate::config::ServerConfig;
use crate::error::TransportError;
use crate::request::{CatalogRequest, DatasetHandle, GenerateRequest};
use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::Client;
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

pub trait ChartBackend: Send + Sync {
    /// `POST` the dataset to the catalog endpoint.
    fn fetch_catalog(&self, request: &CatalogRequest) -> Result<Value, TransportError>;

    /// `POST` the dataset and the encoded selections to the generate endpoint.
    fn generate(&self, request: &GenerateRequest) -> Result<Value, TransportError>;
}

/// Blocking HTTP implementation using multipart uploads.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    catalog_url: String,
    generate_url: String,
}

impl HttpBackend {
    pub fn new(config: &ServerConfig) -> Result<Self, TransportError> {
        // No timeout unless configured: a slow render keeps the session busy until it finishes.
        let client = Client::builder()
            .timeout(config.timeout_secs.map(Duration::from_secs))
            .build()
            .map_err(|e| TransportError::Network(e.to_string()))?;
        Ok(Self {
            client,
            catalog_url: join_url(&config.base_url, &config.catalog_path),
            generate_url: join_url(&config.base_url, &config.generate_path),
        })
    }

    pub fn catalog_url(&self) -> &str {
        &self.catalog_url
    }

    pub fn generate_url(&self) -> &str {
        &self.generate_url
    }

    fn file_part(dataset: &DatasetHandle) -> Result<Part, TransportError> {
        Part::bytes(dataset.read_bytes()?)
            .file_name(dataset.file_name().to_string())
            .mime_str(dataset.format().mime_type())
            .map_err(|e| TransportError::Network(e.to_string()))
    }

    fn post(&self, url: &str, form: Form) -> Result<Value, TransportError> {
        let started = Instant::now();
        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .map_err(|e| TransportError::Network(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .map_err(|e| TransportError::Network(e.to_string()))?;
        debug!(
            url,
            status = status.as_u16(),
            bytes = body.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "response received"
        );
        if !status.is_success() {
            warn!(url, status = status.as_u16(), "server returned an error status");
        }
        // Error statuses still carry a JSON body the caller inspects for an `error` message.
        serde_json::from_str(&body).map_err(|source| TransportError::InvalidBody {
            status: status.as_u16(),
            source,
        })
    }
}

impl ChartBackend for HttpBackend {
    fn fetch_catalog(&self, request: &CatalogRequest) -> Result<Value, TransportError> {
        let form = Form::new().part("file", Self::file_part(&request.file)?);
        self.post(&self.catalog_url, form)
    }

    fn generate(&self, request: &GenerateRequest) -> Result<Value, TransportError> {
        let form = Form::new()
            .part("file", Self::file_part(&request.file)?)
            .text("graphs", request.graphs_json.clone());
        self.post(&self.generate_url, form)
    }
}

/// Join a base URL and an endpoint path with exactly one `/` between them.
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#![allow(dead_code)]

use plotpick::backend::ChartBackend;
use plotpick::error::TransportError;
use plotpick::request::{CatalogRequest, GenerateRequest};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tempfile::TempDir;

/// Canned reply for one endpoint.
#[derive(Debug, Clone)]
pub enum Reply {
    Json(Value),
    Network(String),
}

impl Reply {
    fn to_result(&self) -> Result<Value, TransportError> {
        match self {
            Reply::Json(v) => Ok(v.clone()),
            Reply::Network(msg) => Err(TransportError::Network(msg.clone())),
        }
    }
}

/// In-memory chart server that records what it was sent.
pub struct FakeBackend {
    catalog: Mutex<Reply>,
    generate: Mutex<Reply>,
    pub catalog_calls: AtomicUsize,
    pub generate_calls: AtomicUsize,
    pub last_graphs: Mutex<Option<String>>,
}

impl FakeBackend {
    pub fn new(catalog: Reply, generate: Reply) -> Self {
        Self {
            catalog: Mutex::new(catalog),
            generate: Mutex::new(generate),
            catalog_calls: AtomicUsize::new(0),
            generate_calls: AtomicUsize::new(0),
            last_graphs: Mutex::new(None),
        }
    }

    /// Backend answering with [`sample_catalog`] and [`sample_graphs`].
    pub fn happy() -> Self {
        Self::new(Reply::Json(sample_catalog()), Reply::Json(sample_graphs()))
    }

    pub fn set_catalog(&self, reply: Reply) {
        *self.catalog.lock().unwrap() = reply;
    }

    pub fn set_generate(&self, reply: Reply) {
        *self.generate.lock().unwrap() = reply;
    }

    pub fn catalog_calls(&self) -> usize {
        self.catalog_calls.load(Ordering::SeqCst)
    }

    pub fn generate_calls(&self) -> usize {
        self.generate_calls.load(Ordering::SeqCst)
    }

    /// The `graphs` field of the last generate request, parsed.
    pub fn last_graphs(&self) -> Option<Value> {
        self.last_graphs
            .lock()
            .unwrap()
            .as_deref()
            .map(|s| serde_json::from_str(s).unwrap())
    }
}

impl ChartBackend for FakeBackend {
    fn fetch_catalog(&self, _request: &CatalogRequest) -> Result<Value, TransportError> {
        self.catalog_calls.fetch_add(1, Ordering::SeqCst);
        self.catalog.lock().unwrap().to_result()
    }

    fn generate(&self, request: &GenerateRequest) -> Result<Value, TransportError> {
        self.generate_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_graphs.lock().unwrap() = Some(request.graphs_json.clone());
        self.generate.lock().unwrap().to_result()
    }
}

pub fn sample_catalog() -> Value {
    json!({
        "Possible Graphs": [
            {"Graph Type": "Bar Chart", "X": "Region", "Y": "Sales"},
            {"Graph Type": "Histogram", "X": "Age"},
            {"Graph Type": "Correlation Heatmap", "Columns": ["Age", "Sales"]}
        ],
        "Columns": ["Region", "Age", "Sales"],
        "file_id": "42"
    })
}

/// 1x1 transparent PNG.
pub const TINY_PNG_BASE64: &str =
    "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVR42mNkYAAAAAYAAjCB0C8AAAAASUVORK5CYII=";

pub fn sample_graphs() -> Value {
    json!({
        "graphs": [
            {
                "graph_type": "Bar Chart",
                "columns": {"x_axis": "Region", "y_axis": "Sales"},
                "graph_url": format!("data:image/png;base64,{}", TINY_PNG_BASE64)
            },
            {"error": "Column 'Weight' not found"}
        ]
    })
}

/// Small CSV in a fresh temp dir; keep the TempDir alive for the test's duration.
pub fn sample_csv() -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("sales.csv");
    std::fs::write(&path, "Region,Age,Sales\nNorth,31,120\nSouth,45,80\n")
        .expect("Failed to write sample csv");
    (dir, path)
}

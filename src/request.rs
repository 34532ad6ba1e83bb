//! Outbound payloads for the two collaborator endpoints and decoding of their replies.

use crate::catalog::{CatalogEntry, ChartSpec};
use crate::error::{SessionError, SessionResult, TransportError, UserInputError};
use crate::results::GraphOutcome;
use crate::DatasetFormat;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Success key of the catalog response.
pub const CATALOG_KEY: &str = "Possible Graphs";
/// Success key of the generate response.
pub const GRAPHS_KEY: &str = "graphs";

/// Reference to the dataset chosen for upload. File bytes are read when a request is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetHandle {
    path: PathBuf,
    file_name: String,
    format: DatasetFormat,
}

impl DatasetHandle {
    /// Validate that `path` exists and has an accepted extension.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, UserInputError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(UserInputError::DatasetNotFound(path.to_path_buf()));
        }
        let format =
            DatasetFormat::from_path(path).ok_or_else(|| UserInputError::UnsupportedFormat {
                path: path.to_path_buf(),
                accepted: DatasetFormat::accepted_extensions(),
            })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| format!("dataset.{}", format.extension()));
        Ok(Self {
            path: path.to_path_buf(),
            file_name,
            format,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn format(&self) -> DatasetFormat {
        self.format
    }

    /// Read the dataset for upload.
    pub fn read_bytes(&self) -> Result<Vec<u8>, TransportError> {
        std::fs::read(&self.path).map_err(|source| TransportError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

/// Body of `POST /data_visualization/visualize/`: multipart field `file`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRequest {
    pub file: DatasetHandle,
}

/// Body of `POST /data_visualization/generate_graph`: multipart fields `file` and `graphs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    pub file: DatasetHandle,
    pub graphs_json: String,
}

/// Axis pair as the generate endpoint expects it. `y_axis` is always present, `null` when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnsSelected {
    pub x_axis: String,
    pub y_axis: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphRequest {
    pub graph_type: String,
    pub columns_selected: ColumnsSelected,
}

impl From<&ChartSpec> for GraphRequest {
    fn from(spec: &ChartSpec) -> Self {
        Self {
            graph_type: spec.chart_kind.clone(),
            columns_selected: ColumnsSelected {
                x_axis: spec.x_field.clone(),
                // An empty Y from a degenerate "K (X vs )" label is sent as no Y at all.
                y_axis: spec.y_field.clone().filter(|y| !y.is_empty()),
            },
        }
    }
}

pub fn encode_catalog_request(dataset: Option<&DatasetHandle>) -> SessionResult<CatalogRequest> {
    let file = dataset.ok_or(UserInputError::NoDataset)?;
    Ok(CatalogRequest { file: file.clone() })
}

/// Snapshot the selections into a generate request.
pub fn encode_generate_request(
    dataset: Option<&DatasetHandle>,
    selections: &[ChartSpec],
) -> SessionResult<GenerateRequest> {
    if selections.is_empty() {
        return Err(UserInputError::NoSelections.into());
    }
    let file = dataset.ok_or(UserInputError::NoDataset)?;
    let graphs: Vec<GraphRequest> = selections.iter().map(GraphRequest::from).collect();
    let graphs_json = serde_json::to_string(&graphs).map_err(|e| SessionError::Semantic {
        key: GRAPHS_KEY,
        detail: Some(e.to_string()),
    })?;
    Ok(GenerateRequest {
        file: file.clone(),
        graphs_json,
    })
}

/// Decoded catalog reply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CatalogResponse {
    #[serde(rename = "Possible Graphs")]
    pub entries: Vec<CatalogEntry>,
    #[serde(default)]
    pub file_id: Option<String>,
    /// Dataset column names, when the server reports them.
    #[serde(rename = "Columns", default)]
    pub columns: Vec<String>,
}

impl CatalogResponse {
    pub fn from_json(value: Value) -> SessionResult<Self> {
        require_key(&value, CATALOG_KEY)?;
        serde_json::from_value(value).map_err(|e| SessionError::Semantic {
            key: CATALOG_KEY,
            detail: Some(e.to_string()),
        })
    }
}

/// Decoded generate reply.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GenerateResponse {
    pub graphs: Vec<GraphOutcome>,
}

impl GenerateResponse {
    pub fn from_json(value: Value) -> SessionResult<Self> {
        require_key(&value, GRAPHS_KEY)?;
        serde_json::from_value(value).map_err(|e| SessionError::Semantic {
            key: GRAPHS_KEY,
            detail: Some(e.to_string()),
        })
    }
}

/// A reply without the success key is a semantic failure; carry the server's `error` if any.
fn require_key(value: &Value, key: &'static str) -> SessionResult<()> {
    if value.get(key).is_some_and(|v| !v.is_null()) {
        return Ok(());
    }
    let detail = value
        .get("error")
        .and_then(Value::as_str)
        .map(str::to_string);
    Err(SessionError::Semantic { key, detail })
}

//! Generated chart results and their projection into display units.

use serde::Deserialize;
use serde_json::Value;

/// Text of the placeholder unit shown when there is nothing to display.
pub const NO_DATA_TEXT: &str = "No graphs available.";

/// Axis fields echoed back with a generated chart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GraphColumns {
    #[serde(default)]
    pub x_axis: String,
    /// Absent and `null` both mean no Y axis; an empty string is a blank Y axis.
    #[serde(default)]
    pub y_axis: Option<String>,
}

/// One chart produced by the generate endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChartResult {
    #[serde(rename = "graph_type")]
    pub chart_kind: String,
    pub columns: GraphColumns,
    #[serde(rename = "graph_url")]
    pub image_reference: String,
}

/// One element of the generate response's `graphs` array.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum GraphOutcome {
    Chart(ChartResult),
    /// The server could not produce this graph.
    Failed { error: String },
    Unrecognized(Value),
}

/// Where a chart image comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// `data:` URL carried in the response itself.
    Inline {
        media_type: String,
        base64: bool,
        data: String,
    },
    Remote(String),
}

impl ImageSource {
    pub fn parse(reference: &str) -> Self {
        let Some(rest) = reference.strip_prefix("data:") else {
            return Self::Remote(reference.to_string());
        };
        let (meta, data) = rest.split_once(',').unwrap_or((rest, ""));
        let (media_type, base64) = match meta.strip_suffix(";base64") {
            Some(mt) => (mt, true),
            None => (meta, false),
        };
        let media_type = if media_type.is_empty() {
            "text/plain".to_string()
        } else {
            media_type.to_string()
        };
        Self::Inline {
            media_type,
            base64,
            data: data.to_string(),
        }
    }

    /// Decoded payload size of an inline image.
    pub fn approx_bytes(&self) -> Option<usize> {
        match self {
            Self::Inline {
                base64: true, data, ..
            } => {
                let padding = data.bytes().rev().take_while(|b| *b == b'=').count();
                Some((data.len() / 4 * 3).saturating_sub(padding))
            }
            Self::Inline { data, .. } => Some(data.len()),
            Self::Remote(_) => None,
        }
    }

    /// File extension for the image's media type.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Inline { media_type, .. } => match media_type.as_str() {
                "image/jpeg" => "jpg",
                "image/svg+xml" => "svg",
                "image/gif" => "gif",
                "image/webp" => "webp",
                _ => "png",
            },
            Self::Remote(url) => {
                let lower = url.to_lowercase();
                ["jpg", "jpeg", "svg", "gif", "webp"]
                    .into_iter()
                    .find(|ext| lower.ends_with(&format!(".{ext}")))
                    .unwrap_or("png")
            }
        }
    }

    /// Short human-readable summary for text displays.
    pub fn describe(&self) -> String {
        match self {
            Self::Inline { media_type, .. } => match self.approx_bytes() {
                Some(n) => format!("inline {} ({})", media_type, format_bytes(n as u64)),
                None => format!("inline {}", media_type),
            },
            Self::Remote(url) => url.clone(),
        }
    }
}

/// Human-readable byte size.
pub fn format_bytes(n: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    if n >= MB {
        format!("{:.1} MB", n as f64 / MB as f64)
    } else if n >= KB {
        format!("{:.1} KB", n as f64 / KB as f64)
    } else {
        format!("{} bytes", n)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartCard {
    pub title: String,
    pub x_axis: String,
    /// None when the result had no Y axis; `Some("")` renders a blank Y.
    pub y_axis: Option<String>,
    pub image: ImageSource,
    pub alt_text: String,
}

impl ChartCard {
    /// `X-Axis: Age | Y-Axis: Income`, Y part only when present.
    pub fn axis_text(&self) -> String {
        match &self.y_axis {
            Some(y) => format!("X-Axis: {} | Y-Axis: {}", self.x_axis, y),
            None => format!("X-Axis: {}", self.x_axis),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayUnit {
    NoData,
    Chart(ChartCard),
    Failed { message: String },
}

impl DisplayUnit {
    /// Plain-text rendering, one entry per line.
    pub fn lines(&self) -> Vec<String> {
        match self {
            Self::NoData => vec![NO_DATA_TEXT.to_string()],
            Self::Chart(card) => vec![
                card.title.clone(),
                card.axis_text(),
                format!("Image: {}", card.image.describe()),
            ],
            Self::Failed { message } => vec![format!("Error: {}", message)],
        }
    }
}

impl From<&ChartResult> for ChartCard {
    fn from(result: &ChartResult) -> Self {
        Self {
            title: result.chart_kind.clone(),
            x_axis: result.columns.x_axis.clone(),
            y_axis: result.columns.y_axis.clone(),
            image: ImageSource::parse(&result.image_reference),
            alt_text: format!("{} Graph", result.chart_kind),
        }
    }
}

/// Project results into display units, in input order.
///
/// Empty or absent results yield exactly one [`DisplayUnit::NoData`].
pub fn render(results: Option<&[GraphOutcome]>) -> Vec<DisplayUnit> {
    let results = match results {
        Some(r) if !r.is_empty() => r,
        _ => return vec![DisplayUnit::NoData],
    };
    results
        .iter()
        .map(|outcome| match outcome {
            GraphOutcome::Chart(result) => DisplayUnit::Chart(ChartCard::from(result)),
            GraphOutcome::Failed { error } => DisplayUnit::Failed {
                message: error.clone(),
            },
            GraphOutcome::Unrecognized(value) => DisplayUnit::Failed {
                message: format!("Unrecognized result: {}", value),
            },
        })
        .collect()
}

//! Catalog entries, chart specs and the label codec between them.
//!
//! A label is the human-readable form of a chart option, `"Bar Chart (Age vs Income)"`
//! or `"Count Plot (Age)"`. Labels are built from [`CatalogEntry`] values and decoded
//! back into [`ChartSpec`] values when the user picks one. Field names containing a
//! literal `(`, `)` or `" vs "` do not survive the round trip.

use serde::{Deserialize, Serialize};

/// Separator between the X and Y fields inside a label's parentheses.
pub const AXIS_SEPARATOR: &str = " vs ";

/// Text shown for a selection slot that has no chart chosen yet.
pub const EMPTY_SLOT_LABEL: &str = "-- Choose Graph --";

/// One chart option the server can produce from the uploaded dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    #[serde(rename = "Graph Type")]
    pub chart_kind: String,
    #[serde(rename = "X", default)]
    pub x_field: String,
    #[serde(rename = "Y", default, skip_serializing_if = "Option::is_none")]
    pub y_field: Option<String>,
    /// Column group for whole-dataset charts (e.g. correlation heatmaps), which carry no X.
    #[serde(rename = "Columns", default, skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<String>,
}

impl CatalogEntry {
    pub fn new(chart_kind: impl Into<String>, x_field: impl Into<String>) -> Self {
        Self {
            chart_kind: chart_kind.into(),
            x_field: x_field.into(),
            y_field: None,
            columns: Vec::new(),
        }
    }

    pub fn with_y(mut self, y_field: impl Into<String>) -> Self {
        self.y_field = Some(y_field.into());
        self
    }

    /// Serialized label, the inverse of [`decode_label`].
    pub fn label(&self) -> String {
        encode_label(&self.chart_kind, &self.x_field, self.y_field.as_deref())
    }

    /// The chart spec this entry decodes to when chosen.
    pub fn to_spec(&self) -> ChartSpec {
        ChartSpec {
            chart_kind: self.chart_kind.clone(),
            x_field: self.x_field.clone(),
            y_field: self.y_field.clone(),
        }
    }
}

/// A user's in-progress choice for one selection slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChartSpec {
    pub chart_kind: String,
    pub x_field: String,
    pub y_field: Option<String>,
}

impl ChartSpec {
    /// True for a freshly added slot with nothing chosen.
    pub fn is_empty(&self) -> bool {
        self.chart_kind.is_empty() && self.x_field.is_empty() && self.y_field.is_none()
    }

    pub fn label(&self) -> String {
        encode_label(&self.chart_kind, &self.x_field, self.y_field.as_deref())
    }

    /// Label for display, with a placeholder for empty slots.
    pub fn display_label(&self) -> String {
        if self.is_empty() {
            EMPTY_SLOT_LABEL.to_string()
        } else {
            self.label()
        }
    }
}

/// Build a label from its parts: `"K (X vs Y)"` or `"K (X)"`.
pub fn encode_label(chart_kind: &str, x_field: &str, y_field: Option<&str>) -> String {
    match y_field {
        Some(y) => format!("{chart_kind} ({x_field}{AXIS_SEPARATOR}{y})"),
        None => format!("{chart_kind} ({x_field})"),
    }
}

/// Inner text of the first `(...)` group: the first `(` followed by the nearest `)`.
fn first_group(label: &str) -> Option<&str> {
    let (_, rest) = label.split_once('(')?;
    rest.split_once(')').map(|(inner, _)| inner)
}

/// Decode a catalog label into a chart spec.
///
/// Never fails: text before the first `(` is the chart kind, the first `(...)` group
/// holds the axes, and anything missing comes back as an empty field.
pub fn decode_label(label: &str) -> ChartSpec {
    let chart_kind = label
        .split_once('(')
        .map_or(label, |(kind, _)| kind)
        .trim()
        .to_string();

    let inner = first_group(label).unwrap_or("");

    match inner.split_once(AXIS_SEPARATOR) {
        Some((x, y)) => ChartSpec {
            chart_kind,
            x_field: x.trim().to_string(),
            y_field: Some(y.trim().to_string()),
        },
        None => ChartSpec {
            chart_kind,
            x_field: inner.trim().to_string(),
            y_field: None,
        },
    }
}

/// Find the catalog entry a spec was decoded from, if it is still offered.
pub fn find_entry(catalog: &[CatalogEntry], spec: &ChartSpec) -> Option<usize> {
    if spec.is_empty() {
        return None;
    }
    catalog.iter().position(|entry| {
        entry.chart_kind == spec.chart_kind
            && entry.x_field == spec.x_field
            && entry.y_field == spec.y_field
    })
}

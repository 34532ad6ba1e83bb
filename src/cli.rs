//! CLI definitions live in the plotpick-cli crate so build.rs and gen_docs can share them.

pub use plotpick_cli::{render_options_markdown, Args, DatasetFormat};

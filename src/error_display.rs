//! User-facing error message formatting.
//!
//! Matches on typed errors (SessionError variants, io::ErrorKind) rather than parsing
//! strings, and keeps messages to a single line suitable for a modal or stderr.

use crate::error::{SessionError, TransportError, UserInputError};
use std::io;
use std::path::Path;

/// The request a failure belongs to; some messages differ between the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    FetchCatalog,
    Generate,
}

/// Format a SessionError as a user-facing message.
pub fn user_message_from_session(err: &SessionError, op: Operation) -> String {
    match err {
        SessionError::Input(UserInputError::NoDataset) if op == Operation::Generate => {
            "Please upload a file.".to_string()
        }
        SessionError::Input(e) => e.to_string(),
        SessionError::Selection(e) => format!("Invalid selection: {}", e),
        SessionError::Transport(e) => {
            let cause = user_message_from_transport(e);
            format!("Failed to fetch graphs. Please try again. ({})", cause)
        }
        SessionError::Semantic { detail, .. } => {
            let base = match op {
                Operation::FetchCatalog => "No graph options returned.",
                Operation::Generate => "Error generating graphs!",
            };
            match detail {
                Some(d) => format!("{} {}", base, d),
                None => base.to_string(),
            }
        }
        SessionError::Busy => "Please wait for the current request to finish.".to_string(),
    }
}

fn user_message_from_transport(err: &TransportError) -> String {
    match err {
        TransportError::Network(msg) => msg.clone(),
        TransportError::Io { path, source } => user_message_from_io(
            source,
            Some(&format!("({})", path.display())),
        ),
        TransportError::InvalidBody { status, .. } => {
            format!("server sent an unreadable response (HTTP {})", status)
        }
    }
}

/// Format an io::Error as a user-facing message by matching on ErrorKind.
pub fn user_message_from_io(err: &io::Error, context: Option<&str>) -> String {
    use std::io::ErrorKind;

    let base = match err.kind() {
        ErrorKind::NotFound => "File or directory not found.".to_string(),
        ErrorKind::PermissionDenied => "Permission denied. Check access.".to_string(),
        ErrorKind::ConnectionRefused => {
            "Connection refused. Is the chart server running?".to_string()
        }
        ErrorKind::ConnectionReset => "Connection reset.".to_string(),
        ErrorKind::TimedOut => "Request timed out.".to_string(),
        ErrorKind::InvalidData | ErrorKind::InvalidInput => {
            "Invalid or corrupted data.".to_string()
        }
        ErrorKind::UnexpectedEof => "Unexpected end of file.".to_string(),
        _ => {
            let msg = err.to_string();
            if msg.contains("No space left") {
                "No space left on device. Free up disk space and try again.".to_string()
            } else if msg.contains("Is a directory") {
                "Path is a directory, not a file.".to_string()
            } else {
                msg
            }
        }
    };

    match context {
        Some(ctx) if !ctx.is_empty() => format!("{} {}", base, ctx),
        _ => base,
    }
}

/// Format a color_eyre Report by walking its cause chain for known error types.
pub fn user_message_from_report(report: &color_eyre::eyre::Report, path: Option<&Path>) -> String {
    let with_path = |msg: String| match path {
        Some(p) => format!("{}: {}", p.display(), msg),
        None => msg,
    };

    for cause in report.chain() {
        if let Some(e) = cause.downcast_ref::<UserInputError>() {
            return e.to_string();
        }
        if let Some(io_err) = cause.downcast_ref::<io::Error>() {
            return with_path(user_message_from_io(io_err, None));
        }
    }

    // First line only; full chains belong in the log
    let display = report.to_string();
    let first_line = display.lines().next().map(str::trim).unwrap_or("");
    with_path(if first_line.is_empty() {
        "An error occurred".to_string()
    } else {
        first_line.to_string()
    })
}

use thiserror::Error;

/// Unified error type for the entire carbon-map-core library.
///
/// The store reducer never returns this type: fetch failures reach the
/// store as `*FetchFailed` events instead. Loaders, providers and the
/// facade's fetch methods return `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Configuration ───────────────────────────────────────────────
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // ── File I/O (native only) ──────────────────────────────────────
    #[error("File I/O error: {0}")]
    FileIO(String),

    // ── API / Network ───────────────────────────────────────────────
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error ({endpoint}, HTTP {status}): {message}")]
    Api {
        endpoint: String,
        status: u16,
        message: String,
    },

    // ── Store lookups ───────────────────────────────────────────────
    #[error("Unknown zone: {0}")]
    UnknownZone(String),

    #[error("Invalid datetime '{0}': expected RFC 3339")]
    InvalidDatetime(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::FileIO(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // reqwest errors carry the full URL; drop the query so tokens and
        // zone filters don't end up in logs.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CoreError::Network(sanitized)
    }
}

//! Shared constants for Mathcards components.

/// Default HTTP listen address
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8000";

/// Random bytes behind a session id (encoded as URL-safe base64)
pub const SESSION_ID_BYTES: usize = 16;

/// Difficulty used when the requested one has no stage table
pub const FALLBACK_DIFFICULTY: i64 = 3;

/// HTTP API paths
pub mod paths {
    /// Start a new session
    pub const START: &str = "/api/start";

    /// Next problem: /api/next/{session_id}
    pub const NEXT: &str = "/api/next/{session_id}";

    /// Submit an answer: /api/answer/{session_id}
    pub const ANSWER: &str = "/api/answer/{session_id}";
}

//! Global constants for the annotation engine

/// Persistence service used when nothing else is configured
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// Directory name under the platform config directory
pub const CONFIG_DIR_NAME: &str = "annotate";

/// Environment variable overriding the service URL
pub const ENV_API_URL: &str = "ANNOTATE_API_URL";

/// Environment variable overriding the signed-in user
pub const ENV_USER: &str = "ANNOTATE_USER";

/// Default number of creations remembered by the history undo policy
pub const DEFAULT_MAX_UNDO_HISTORY: usize = 100;

/// Pin colors, picked per author by name hash
pub const AUTHOR_PALETTE: [&str; 10] = [
    "#ef4444", "#f97316", "#eab308", "#22c55e", "#06b6d4", "#3b82f6", "#8b5cf6", "#ec4899",
    "#f43f5e", "#14b8a6",
];

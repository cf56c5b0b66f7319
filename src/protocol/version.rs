//! MCP protocol version management
//!
//! A protocol version is a short date string (e.g. "2025-11-25"). The
//! supported set is kept in descending order so the first entry is always the
//! latest revision.

/// Supported protocol versions, newest first
pub const SUPPORTED_PROTOCOL_VERSIONS: [&str; 4] =
    ["2025-11-25", "2025-06-18", "2025-03-26", "2024-11-05"];

/// The latest supported protocol version
pub const LATEST_PROTOCOL_VERSION: &str = SUPPORTED_PROTOCOL_VERSIONS[0];

/// Check whether a version string is in the supported set
pub fn is_supported(version: &str) -> bool {
    SUPPORTED_PROTOCOL_VERSIONS.contains(&version)
}

/// Pick the version to answer an `initialize` request with.
///
/// Returns the requested version when it is supported, otherwise the latest
/// version this implementation speaks.
pub fn negotiate_version(requested: &str) -> &'static str {
    SUPPORTED_PROTOCOL_VERSIONS
        .iter()
        .find(|v| **v == requested)
        .copied()
        .unwrap_or(LATEST_PROTOCOL_VERSION)
}

// SocialGaze - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "SocialGaze";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "SocialGaze";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Data source
// =============================================================================

/// Source read when neither the CLI nor config.toml names one.
pub const DEFAULT_SOURCE_PATH: &str = "data.csv";

/// Source argument that selects standard input.
pub const STDIN_SOURCE: &str = "-";

/// Maximum size of a raw source in bytes (256 MiB).
/// The whole source is materialised in memory before parsing.
pub const MAX_SOURCE_BYTES: u64 = 256 * 1024 * 1024;

// =============================================================================
// Record loader
// =============================================================================

/// Delimiters considered during auto-detection, in preference order.
/// The last two are the ASCII record and unit separators.
pub const DELIMITER_CANDIDATES: &[u8] = &[b',', b'\t', b'|', b';', 0x1E, 0x1F];

/// Delimiter used when auto-detection finds no consistent candidate.
pub const DEFAULT_DELIMITER: u8 = b',';

/// Number of leading lines sampled for delimiter auto-detection.
pub const DELIMITER_SAMPLE_LINES: usize = 10;

/// Exclusive magnitude bound (2^53) for numeric inference.
/// Literals at or beyond it cannot round-trip through an f64 and stay text.
pub const NUMERIC_INFERENCE_LIMIT: f64 = 9_007_199_254_740_992.0;

/// Maximum number of malformed-row line numbers retained in a load report.
pub const MAX_REPORTED_MALFORMED_ROWS: usize = 100;

// =============================================================================
// Dataset field names
// =============================================================================

pub const FIELD_USERNAME: &str = "username";
pub const FIELD_FOLLOWER_COUNT: &str = "follower_count";
pub const FIELD_REGION: &str = "region";
pub const FIELD_ACTIVITY_LEVEL: &str = "activity_level";
pub const FIELD_PROFILE_PIC: &str = "profile_pic";
pub const FIELD_ACCOUNT_TYPE: &str = "account_type";
pub const FIELD_REAL_ACCOUNT_TYPE: &str = "real_account_type";

// =============================================================================
// Dashboard categories
// =============================================================================

/// Activity levels that count an account as active.
pub const ACTIVE_LEVELS: &[&str] = &["High", "Medium"];

/// Literal stored in `profile_pic` when an account has a picture.
/// Compared as text, never coerced to a boolean.
pub const PROFILE_PIC_PRESENT: &str = "True";

/// Account type categories, in chart order.
pub const ACCOUNT_TYPES: &[&str] = &["Real", "Fake"];

/// `real_account_type` value identifying influencers.
pub const INFLUENCER_TYPE: &str = "Influencer";

/// Default region slices: (region code in the data, display label).
pub const DEFAULT_REGIONS: &[(&str, &str)] = &[
    ("USA", "United States"),
    ("Canada", "Canada"),
    ("India", "India"),
];

/// Upper bound on configured regions (one chart slice each).
pub const MAX_REGIONS: usize = 64;

/// Width in characters of the longest bar in the text renderer.
pub const TEXT_BAR_WIDTH: usize = 40;

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Maximum length of a raw source line included in debug output.
/// Prevents accidental exposure of account data in long lines.
pub const DEBUG_MAX_LINE_PREVIEW: usize = 200;

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

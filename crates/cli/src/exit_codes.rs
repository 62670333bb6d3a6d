//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract; scripts rely on them.
//!
//! # Exit Code Ranges
//!
//! | Range   | Domain           | Description                              |
//! |---------|------------------|------------------------------------------|
//! | 0       | Universal        | Success                                  |
//! | 1       | Universal        | General error / discrepancies found      |
//! | 2       | Universal        | CLI usage error (bad args, missing file) |
//! | 3-9     | local files      | Config, count sheet, result workbook     |
//! | 50-59   | store            | Remote store lookups                     |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant in the appropriate range
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into the relevant command's error handling

use stockcheck_io::IoError;
use stockcheck_store::StoreError;

// =============================================================================
// Universal (0-2)
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing file, unknown column.
pub const EXIT_USAGE: u8 = 2;

// =============================================================================
// Reconciliation
// =============================================================================

/// Discrepancies found (only with `run --fail-on-diff`).
/// Like `diff(1)`, exit 1 means "inputs differ."
pub const EXIT_RECON_DIFFS: u8 = 1;

// =============================================================================
// Local files (3-9)
// =============================================================================

/// Config file unreadable or invalid.
pub const EXIT_CONFIG: u8 = 3;

/// Count sheet could not be opened or read.
pub const EXIT_READ: u8 = 5;

/// Result workbook could not be written.
pub const EXIT_WRITE: u8 = 6;

// =============================================================================
// Store (50-59): remote store lookups
// =============================================================================

/// No project configured (neither flag, env var, nor config file).
pub const EXIT_STORE_NOT_CONFIGURED: u8 = 50;

/// Access rejected by the store service (401/403).
pub const EXIT_STORE_AUTH: u8 = 51;

/// Request rejected by the store service (400).
pub const EXIT_STORE_VALIDATION: u8 = 52;

/// Rate limited (429).
pub const EXIT_STORE_RATE_LIMIT: u8 = 53;

/// Upstream error (5xx), network failure, or unreadable response.
pub const EXIT_STORE_UPSTREAM: u8 = 54;

/// Requested store does not exist.
pub const EXIT_STORE_NOT_FOUND: u8 = 57;

/// Map a StoreError to its exit code.
pub fn store_exit_code(err: &StoreError) -> u8 {
    match err {
        StoreError::NotConfigured => EXIT_STORE_NOT_CONFIGURED,
        StoreError::InvalidId(_) => EXIT_USAGE,
        StoreError::Auth(_) => EXIT_STORE_AUTH,
        StoreError::Validation(_) => EXIT_STORE_VALIDATION,
        StoreError::RateLimited => EXIT_STORE_RATE_LIMIT,
        StoreError::Network(_) | StoreError::Http(..) | StoreError::Parse(_) => EXIT_STORE_UPSTREAM,
    }
}

/// Map an IoError to its exit code.
pub fn io_exit_code(err: &IoError) -> u8 {
    match err {
        IoError::UnsupportedFormat(_) | IoError::SheetNotFound { .. } | IoError::UnknownColumn { .. } => EXIT_USAGE,
        IoError::Open { .. } | IoError::Empty(_) | IoError::Read { .. } => EXIT_READ,
        IoError::Write(_) => EXIT_WRITE,
    }
}

// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the crate. Constants are organized by category.
//!
//! # Categories
//!
//! - **Store**: notification capacity bounds
//! - **Removal**: delay between dismissal and removal
//! - **Diagnostics**: event buffer capacity bounds

// ==========================================================================
// Store Defaults
// ==========================================================================

/// Default number of notifications retained simultaneously.
/// One is the admin console's reference behavior: a new toast replaces
/// the previous one.
pub const DEFAULT_STORE_CAPACITY: usize = 1;

/// Minimum allowed store capacity. A capacity of zero is rejected at
/// construction time, not clamped.
pub const MIN_STORE_CAPACITY: usize = 1;

// ==========================================================================
// Removal Delay Defaults
// ==========================================================================

/// Default delay between dismissal and removal (in milliseconds).
pub const DEFAULT_REMOVAL_DELAY_MS: u64 = 3000;

/// Minimum removal delay (in milliseconds).
pub const MIN_REMOVAL_DELAY_MS: u64 = 100;

/// Maximum removal delay (in milliseconds).
pub const MAX_REMOVAL_DELAY_MS: u64 = 60_000;

// ==========================================================================
// Diagnostics Defaults
// ==========================================================================

/// Default diagnostics event buffer capacity.
pub const DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY: usize = 1000;

/// Minimum diagnostics event buffer capacity.
pub const MIN_DIAGNOSTICS_BUFFER_CAPACITY: usize = 100;

/// Maximum diagnostics event buffer capacity.
pub const MAX_DIAGNOSTICS_BUFFER_CAPACITY: usize = 10_000;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    // Store validation
    assert!(MIN_STORE_CAPACITY > 0);
    assert!(DEFAULT_STORE_CAPACITY >= MIN_STORE_CAPACITY);

    // Removal delay validation
    assert!(MIN_REMOVAL_DELAY_MS > 0);
    assert!(MAX_REMOVAL_DELAY_MS >= MIN_REMOVAL_DELAY_MS);
    assert!(DEFAULT_REMOVAL_DELAY_MS >= MIN_REMOVAL_DELAY_MS);
    assert!(DEFAULT_REMOVAL_DELAY_MS <= MAX_REMOVAL_DELAY_MS);

    // Diagnostics validation
    assert!(MIN_DIAGNOSTICS_BUFFER_CAPACITY > 0);
    assert!(MAX_DIAGNOSTICS_BUFFER_CAPACITY >= MIN_DIAGNOSTICS_BUFFER_CAPACITY);
    assert!(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY >= MIN_DIAGNOSTICS_BUFFER_CAPACITY);
    assert!(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY <= MAX_DIAGNOSTICS_BUFFER_CAPACITY);
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_defaults_are_valid() {
        assert_eq!(DEFAULT_STORE_CAPACITY, 1);
        assert!(DEFAULT_STORE_CAPACITY >= MIN_STORE_CAPACITY);
    }

    #[test]
    fn removal_delay_defaults_are_valid() {
        assert_eq!(DEFAULT_REMOVAL_DELAY_MS, 3000);
        assert!(DEFAULT_REMOVAL_DELAY_MS >= MIN_REMOVAL_DELAY_MS);
        assert!(DEFAULT_REMOVAL_DELAY_MS <= MAX_REMOVAL_DELAY_MS);
    }

    #[test]
    fn diagnostics_defaults_are_valid() {
        assert_eq!(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY, 1000);
        assert!(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY >= MIN_DIAGNOSTICS_BUFFER_CAPACITY);
        assert!(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY <= MAX_DIAGNOSTICS_BUFFER_CAPACITY);
    }
}

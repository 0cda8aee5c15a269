//! Centralized default constants for promptbank.
//!
//! **This module is the single source of truth** for shared default values
//! and user-facing messages. The client and the application reference these
//! constants instead of defining their own magic numbers.

// =============================================================================
// CATALOG
// =============================================================================

/// Sentinel category that disables category filtering.
pub const ALL_CATEGORIES: &str = "All";

// =============================================================================
// CLIENT
// =============================================================================

/// Artificial delay before mock mode returns its sample data, so the
/// loading view is exercised.
pub const MOCK_DELAY_MS: u64 = 1000;

/// Mutation envelopes are inspected unless explicitly disabled.
pub const STRICT_MUTATIONS: bool = true;

/// Message used when a list envelope reports failure without a message.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch";

/// Slow store call threshold for warnings (milliseconds).
pub const SLOW_REQUEST_MS: u64 = 5000;

// =============================================================================
// ADMIN GATE
// =============================================================================

/// Gestures needed within the window to reveal the login prompt.
pub const ADMIN_GESTURE_COUNT: u32 = 3;

/// Window after the latest gesture before the count resets (milliseconds).
pub const ADMIN_GESTURE_WINDOW_MS: u64 = 500;

/// Admin password used when none is configured at build or run time.
pub const ADMIN_PASSWORD: &str = "admin123";

// =============================================================================
// NOTIFICATIONS
// =============================================================================

/// How long a toast stays visible (milliseconds).
pub const TOAST_DURATION_MS: u64 = 3000;

/// Inline message shown in place of content when the list fails to load.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load prompts. Check connection or API URL.";

/// Empty-state message when no record passes the filter.
pub const EMPTY_STATE_MESSAGE: &str = "No prompts found matching your criteria.";

/// Lines of body text shown on a grid card.
pub const CARD_PREVIEW_LINES: usize = 3;

/// Characters per preview line on a grid card.
pub const CARD_PREVIEW_WIDTH: usize = 72;

//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Init and shared utilities (open_db, resolve_date, print_json)
//! - `folders` - Folder management commands (list, add, rename, delete)
//! - `funds` - Fund management commands (list, add, budget, archive, delete)
//! - `reports` - Engine reports (progress, score, alerts, insights)
//! - `transactions` - Transaction commands (add, list, delete)

pub mod core;
pub mod folders;
pub mod funds;
pub mod reports;
pub mod transactions;

// Re-export command functions for main.rs
pub use core::*;
pub use folders::*;
pub use funds::*;
pub use reports::*;
pub use transactions::*;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

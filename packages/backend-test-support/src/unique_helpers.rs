//! Helpers for generating unique test identities
//!
//! Player names carry a ULID suffix so that tests sharing a process never
//! collide in a session registry.

use ulid::Ulid;

/// Generate a unique string with the given prefix
///
/// # Examples
/// ```
/// use codex_test_support::unique_helpers::unique_str;
///
/// let id1 = unique_str("ann");
/// let id2 = unique_str("ann");
/// assert_ne!(id1, id2);
/// assert!(id1.starts_with("ann-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// Generate `count` unique player names, `p0-<ulid>`, `p1-<ulid>`, ...
///
/// # Examples
/// ```
/// use codex_test_support::unique_helpers::unique_player_names;
///
/// let names = unique_player_names(3);
/// assert_eq!(names.len(), 3);
/// assert!(names[2].starts_with("p2-"));
/// ```
pub fn unique_player_names(count: usize) -> Vec<String> {
    (0..count).map(|i| unique_str(&format!("p{i}"))).collect()
}

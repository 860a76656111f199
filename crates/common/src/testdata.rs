//! Unique test-data generation
//!
//! Entity names created through the UI (loops, wallboards, users) must not
//! collide across runs, and must stay findable by prefix so cleanup sweeps
//! can remove strays left behind by crashed runs.

use rand::Rng;

/// Generate a unique entity name under a stable prefix.
///
/// Shape: `{prefix}-{yyyymmddHHMMSS}-{4 random lowercase chars}`. The
/// timestamp keeps names sortable by creation time when eyeballing the
/// management UI; the random suffix covers two runs inside the same second.
pub fn unique_name(prefix: &str) -> String {
    let stamp = chrono::Utc::now().format("%Y%m%d%H%M%S");
    let mut rng = rand::thread_rng();
    let suffix: String = (0..4)
        .map(|_| rng.gen_range(b'a'..=b'z') as char)
        .collect();
    format!("{prefix}-{stamp}-{suffix}")
}

/// Prefix all suite-created entities carry so cleanup can find them.
pub const SUITE_PREFIX: &str = "e2e";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_names_keep_their_prefix() {
        let name = unique_name("e2e-loop");
        assert!(name.starts_with("e2e-loop-"));
    }

    #[test]
    fn unique_names_do_not_collide() {
        let a = unique_name("e2e-wb");
        let b = unique_name("e2e-wb");
        assert_ne!(a, b);
    }
}

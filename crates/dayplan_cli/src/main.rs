//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `dayplan_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("dayplan_core ping={}", dayplan_core::ping());
    println!("dayplan_core version={}", dayplan_core::core_version());
}

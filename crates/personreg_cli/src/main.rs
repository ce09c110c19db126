//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `personreg_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("personreg_core ping={}", personreg_core::ping());
    println!("personreg_core version={}", personreg_core::core_version());
}

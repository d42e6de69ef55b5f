//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `caltrack_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    // Tiny probe to validate core crate wiring independently from the
    // desktop shell.
    println!("caltrack_core ping={}", caltrack_core::ping());
    println!("caltrack_core version={}", caltrack_core::core_version());
}

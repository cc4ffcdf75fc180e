/*!
Components provided by the underlying platform.

This module defines implementations of [`crate::Document`], [`crate::LocalClock`], and [`crate::Scheduler`] that use capabilities of the host platform.
*/

#[cfg(all(
    feature = "web",
    target_arch = "wasm32",
    target_vendor = "unknown",
    target_os = "unknown"
))]
pub mod web;

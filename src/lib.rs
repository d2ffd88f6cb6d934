//! Animated single-page portfolio compiled to WebAssembly.
//!
//! Layout, timing, validation and form logic are target independent so they
//! run under a plain `cargo test`. Everything that touches the DOM lives in
//! the `wasm` module and is only compiled for `wasm32`.

#![cfg_attr(target_arch = "wasm32", allow(dead_code))]

pub mod boundary;
pub mod config;
pub mod contact;
pub mod content;
pub mod effects;
pub mod error;
pub mod modal;
pub mod motion;
pub mod pointer;
pub mod signal;
pub mod viewport;

pub use config::SiteConfig;
pub use error::{Result, SiteError};
pub use signal::{SignalEvent, SignalKind, SignalSource, Subscription};
pub use viewport::{Breakpoints, ViewportClass, ViewportClassifier};

// Only compile wasm-specific code when targeting wasm32.
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::{mount, unmount};

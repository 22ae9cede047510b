//! Platform bindings
//!
//! - `web`: `WebGame`, the session exposed to JavaScript over LocalStorage

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(target_arch = "wasm32")]
pub use web::WebGame;

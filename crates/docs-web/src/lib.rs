//! RAG docs site core
//!
//! This crate provides:
//! - `model` / `config`: the entry collection and site content, loaded from TOML
//! - `filter` / `highlight`: category + free-text filtering and term marking
//! - `url_state`: two-way sync between filter state and the page URL
//! - `events` / `state` / `debounce` / `viewer`: the page state as a pure
//!   reducer from events to effects
//! - `controller`: that reducer behind the JSON interface the page host uses
//! - `render` / `assets`: HTML rendering and embedded CSS/JS
//! - `export` / `static_site`: `features.json` and the static build
//! - `wasm` (feature-gated): the controller exposed to JavaScript as
//!   `SiteController`

pub mod assets;
pub mod config;
pub mod controller;
pub mod debounce;
pub mod escape;
pub mod events;
pub mod export;
pub mod filter;
pub mod highlight;
pub mod model;
pub mod render;
pub mod state;
pub mod static_site;
pub mod url_state;
pub mod viewer;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use config::{ConfigError, Site};
pub use filter::{CategoryFilter, FilterState, apply_filter};
pub use highlight::{highlight_html, highlight_term};
pub use model::{Entry, EntryCollection};

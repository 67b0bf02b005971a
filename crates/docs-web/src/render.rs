//! Server-side HTML rendering.
//!
//! The same markup is produced by the browser script at runtime; rendering
//! it here gives the static build and the preview server a complete first
//! paint without JavaScript.

pub mod cards;
pub mod markdown;
pub mod sections;
pub mod viewer;

pub use cards::{render_card, render_cards, render_filter_bar, render_search_input};
pub use markdown::render_markdown;
pub use sections::{render_architecture, render_optimizations, render_pipeline, render_tech};
pub use viewer::{render_doc_nav, render_doc_panels};

//! # Parish Site
//!
//! Generates the single-page website of a parish community: mass schedules,
//! sacrament costs, prayer times, a photo strip of parish life, and contact
//! details.
//!
//! # Architecture: Load, Merge, Render
//!
//! ```text
//! 1. Load      endpoint (or file)  →  partial document   (may fail, never fatal)
//! 2. Merge     default + partial   →  effective document (pure)
//! 3. Render    effective document  →  dist/index.html    (maud)
//! ```
//!
//! The page can always be built: the bundled default document is complete on
//! its own, and any failure while loading (network error, bad status, broken
//! JSON) leaves it in place. A remote document only has to carry the fields it
//! wants to change.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`content`] | Content document types, the bundled default, and [`content::merge`] |
//! | [`loader`] | Content sources (HTTP, file) and the [`loader::ContentState`] with its loading flag |
//! | [`config`] | `site.toml` loading, validation, merging, and palette CSS |
//! | [`generate`] | Renders the page with Maud and writes the output directory |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## One Fetch, No Retries
//!
//! Content is requested once per build. A failed request is logged and the
//! build carries on with the default; rerunning the build is the retry.
//!
//! ## Lists Replace, Objects Merge
//!
//! Nested objects (`hero`, `contact`, community titles) merge field by field.
//! Lists (`schedules`, `costs`, `prayers`, `community.photos`) are replaced as
//! a whole by a non-empty remote list. Merging lists element by element would
//! need a key for every element type and would make it impossible to remove
//! an entry remotely.
//!
//! ## Static Output
//!
//! The page is plain HTML with embedded CSS. Hover effects are CSS-only and
//! navigation uses in-page anchors, so the output can be served from any file
//! server.

pub mod config;
pub mod content;
pub mod generate;
pub mod loader;
pub mod output;

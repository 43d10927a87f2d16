//! Version resolution layer for action references
//!
//! This module classifies version tokens, looks up the latest release of an
//! action, and caches what it finds for the rest of the run.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Lookup    │────▶│  Resolver   │◀───▶│    Cache    │
//! │  (fetch)    │     │ (decide)    │     │  (storage)  │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!        │                   │
//!        ▼                   ▼
//! ┌─────────────┐     ┌─────────────┐
//! │ Registries  │     │ Classifier  │
//! │  (github)   │     │(token kinds)│
//! └─────────────┘     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`cache`]: In-memory release cache guarded by a reader/writer lock
//! - [`classifier`]: Commit SHA / major constraint / semver classification
//! - [`registry`]: Release lookup trait for fetching releases from the host
//! - [`registries`]: Concrete lookup implementations (GitHub)
//! - [`resolver`]: Cache-aware release resolution
//! - [`error`]: Error types for lookup and resolution
//! - [`semver`]: Version ordering helpers

pub mod cache;
pub mod classifier;
pub mod error;
pub mod registries;
pub mod registry;
pub mod resolver;
pub mod semver;

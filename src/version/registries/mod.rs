//! Release lookup implementations

pub mod github;

pub use github::GitHubReleaseLookup;

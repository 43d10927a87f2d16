//! Parser layer
//! - traits.rs: Parser trait definition
//! - types.rs: Action reference types (UsesValue, ActionReference, ActionIdentity)
//! - github_actions.rs: GitHub Actions workflow parser

pub mod github_actions;
pub mod traits;
pub mod types;

pub use github_actions::GitHubActionsParser;
pub use traits::{ParseError, Parser};
pub use types::{ActionIdentity, ActionReference, ReferenceError, UsesValue};

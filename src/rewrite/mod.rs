//! Text rewriting layer
//! - reference.rs: line-oriented `name@version` substitution
//! - comment.rs: trailing version comment decision table

pub mod comment;
pub mod reference;

pub use comment::{CommentShape, update_version_comment};
pub use reference::{RewriteTarget, rewrite};

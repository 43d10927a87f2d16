#![allow(dead_code)]

mod lookup;
mod workspace;

pub use lookup::*;
pub use workspace::*;

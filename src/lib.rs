#![doc = include_str!("../README.md")]

mod error;
pub mod quadtree;

pub use error::{QuadTreeError, Result};
pub use quadtree::{Neighbour, QuadTree, QuadTreeBuilder};

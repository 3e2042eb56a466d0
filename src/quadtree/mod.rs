//! A growing quadtree of points of interest over latitude and longitude.

mod builder;
mod consistency;
pub mod constants;
mod index;
mod neighbour;
mod node;
mod rect;
pub mod traversal;

pub use builder::QuadTreeBuilder;
pub use consistency::Consistency;
pub use index::QuadTree;
pub use neighbour::Neighbour;
pub use rect::{Coord, Quadrant, Rect};
pub use traversal::NodeRef;

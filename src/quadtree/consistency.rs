/// How much of a [`QuadTree`][crate::QuadTree] is serialized by its whole-tree lock.
///
/// Structural safety never depends on this choice: child slots are write-once and every
/// resident list has its own mutex. What changes is which operations wait for each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Consistency {
    /// Only `add` takes the tree lock, so concurrent adds run one at a time. `remove` and
    /// queries never wait. A query racing an `add` may or may not see the point being added,
    /// and a query racing several adds may see any subset of them.
    #[default]
    InsertOnly,

    /// `add` and `remove` take the tree lock exclusively and queries take it shared, so every
    /// query observes the tree between whole mutations.
    Strict,
}

pub mod selector;

pub use selector::{FirstLegalMoveSelector, MoveSelector, Policy, PolicySelector};

use derive_more::Display;
use serde::{Deserialize, Serialize};

///
/// Phase
///
/// Execution stage of the surrounding transaction or job. The derived
/// ordering is load-bearing: a transition may fire in its declared minimum
/// phase or any later one.
///

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
pub enum Phase {
    #[default]
    Statement,
    PreCommit,
    PostCommit,
}

impl Phase {
    /// All phases in execution order.
    pub const ALL: [Self; 3] = [Self::Statement, Self::PreCommit, Self::PostCommit];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phases_are_strictly_ordered() {
        assert!(Phase::Statement < Phase::PreCommit);
        assert!(Phase::PreCommit < Phase::PostCommit);
        assert_eq!(Phase::default(), Phase::Statement);
    }
}

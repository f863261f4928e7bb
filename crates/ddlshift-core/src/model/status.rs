use derive_more::Display;
use serde::{Deserialize, Serialize};

///
/// Status
///
/// Lifecycle position of an element. Which statuses a kind visits, and in
/// which order, is declared by its rule sets in `opgen`.
///

#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    #[display("ABSENT")]
    Absent,
    #[display("DELETE_ONLY")]
    DeleteOnly,
    #[display("WRITE_ONLY")]
    WriteOnly,
    #[display("BACKFILLED")]
    Backfilled,
    #[display("VALIDATED")]
    Validated,
    #[display("TXN_DROPPED")]
    TxnDropped,
    #[display("DROPPED")]
    Dropped,
    #[display("PUBLIC")]
    Public,
}

///
/// Direction
///
/// Direction of travel chosen once when an element is targeted.
///

#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub enum Direction {
    ToPublic,
    ToAbsent,
}

impl Direction {
    pub const ALL: [Self; 2] = [Self::ToPublic, Self::ToAbsent];

    /// Terminal status of a chain travelling in this direction.
    #[must_use]
    pub const fn terminal(self) -> Status {
        match self {
            Self::ToPublic => Status::Public,
            Self::ToAbsent => Status::Absent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_display_matches_serialized_form() {
        for status in [Status::Absent, Status::TxnDropped, Status::WriteOnly, Status::Public] {
            let json = serde_json::to_string(&status).expect("status should serialize");
            assert_eq!(json, format!("\"{status}\""));
        }
    }

    #[test]
    fn direction_terminals() {
        assert_eq!(Direction::ToPublic.terminal(), Status::Public);
        assert_eq!(Direction::ToAbsent.terminal(), Status::Absent);
    }
}

//! Session types offered on an event weekend

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::PaddockError;

/// One timed track activity on an event weekend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SessionType {
    Practice1,
    Practice2,
    Practice3,
    Qualifying,
    Sprint,
    Race,
}

impl SessionType {
    /// All session types in weekend order.
    pub const ALL: [SessionType; 6] = [
        SessionType::Practice1,
        SessionType::Practice2,
        SessionType::Practice3,
        SessionType::Qualifying,
        SessionType::Sprint,
        SessionType::Race,
    ];

    /// Short identifier used by the store (`FP1`, `Q`, `R`, ...).
    pub fn identifier(self) -> &'static str {
        match self {
            SessionType::Practice1 => "FP1",
            SessionType::Practice2 => "FP2",
            SessionType::Practice3 => "FP3",
            SessionType::Qualifying => "Q",
            SessionType::Sprint => "S",
            SessionType::Race => "R",
        }
    }

    /// Display label (`Practice 1`, `Qualifying`, ...).
    pub fn label(self) -> &'static str {
        match self {
            SessionType::Practice1 => "Practice 1",
            SessionType::Practice2 => "Practice 2",
            SessionType::Practice3 => "Practice 3",
            SessionType::Qualifying => "Qualifying",
            SessionType::Sprint => "Sprint",
            SessionType::Race => "Race",
        }
    }

    pub fn is_practice(self) -> bool {
        matches!(self, SessionType::Practice1 | SessionType::Practice2 | SessionType::Practice3)
    }
}

impl fmt::Display for SessionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SessionType {
    type Err = PaddockError;

    /// Accepts identifiers (`FP1`, `Q`, `R`) and labels (`Practice 1`, `Race`), ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String =
            s.trim().chars().filter(|c| !c.is_whitespace()).collect::<String>().to_ascii_uppercase();

        let session = match normalized.as_str() {
            "FP1" | "PRACTICE1" => SessionType::Practice1,
            "FP2" | "PRACTICE2" => SessionType::Practice2,
            "FP3" | "PRACTICE3" => SessionType::Practice3,
            "Q" | "QUALIFYING" => SessionType::Qualifying,
            "S" | "SPRINT" => SessionType::Sprint,
            "R" | "RACE" => SessionType::Race,
            _ => return Err(PaddockError::InvalidSessionType { value: s.to_string() }),
        };

        Ok(session)
    }
}

//! Transit line identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an unknown route code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown route code: {0:?}")]
pub struct UnknownLine(String);

/// One of the rapid transit lines.
///
/// The set is closed. Serialized as the upstream route code
/// (`"Brn"`, `"G"`, ...), which is also what arrival predictions carry
/// in their `rt` field.
///
/// # Examples
///
/// ```
/// use transit_server::domain::Line;
///
/// let brown = Line::parse("Brn").unwrap();
/// assert_eq!(brown, Line::Brown);
/// assert_eq!(brown.name(), "Brown");
///
/// assert!(Line::parse("brown").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Line {
    Red,
    Blue,
    #[serde(rename = "Brn")]
    Brown,
    #[serde(rename = "G")]
    Green,
    #[serde(rename = "Org")]
    Orange,
    #[serde(rename = "P")]
    Purple,
    #[serde(rename = "Pexp")]
    PurpleExpress,
    Pink,
    #[serde(rename = "Y")]
    Yellow,
}

impl Line {
    /// Every line, in canonical order.
    pub const ALL: [Line; 9] = [
        Line::Red,
        Line::Blue,
        Line::Brown,
        Line::Green,
        Line::Orange,
        Line::Purple,
        Line::PurpleExpress,
        Line::Pink,
        Line::Yellow,
    ];

    /// Parse an upstream route code. Matching is exact.
    pub fn parse(code: &str) -> Result<Self, UnknownLine> {
        Line::ALL
            .into_iter()
            .find(|line| line.code() == code)
            .ok_or_else(|| UnknownLine(code.to_string()))
    }

    /// Upstream route code.
    pub fn code(self) -> &'static str {
        match self {
            Line::Red => "Red",
            Line::Blue => "Blue",
            Line::Brown => "Brn",
            Line::Green => "G",
            Line::Orange => "Org",
            Line::Purple => "P",
            Line::PurpleExpress => "Pexp",
            Line::Pink => "Pink",
            Line::Yellow => "Y",
        }
    }

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            Line::Red => "Red",
            Line::Blue => "Blue",
            Line::Brown => "Brown",
            Line::Green => "Green",
            Line::Orange => "Orange",
            Line::Purple => "Purple",
            Line::PurpleExpress => "Purple Express",
            Line::Pink => "Pink",
            Line::Yellow => "Yellow",
        }
    }

    /// Brand colour as a `#RRGGBB` string.
    pub fn hex(self) -> &'static str {
        match self {
            Line::Red => "#C60C30",
            Line::Blue => "#00A1DE",
            Line::Brown => "#662233",
            Line::Green => "#009B3A",
            Line::Orange => "#F9461C",
            // Express service shares the Purple livery
            Line::Purple | Line::PurpleExpress => "#522398",
            Line::Pink => "#E27EA6",
            Line::Yellow => "#F9E300",
        }
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

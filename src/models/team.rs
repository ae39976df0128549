//! Team, Pot, and Confederation data structures.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Continental federation a team belongs to.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub enum Confederation {
    #[serde(rename = "UEFA")]
    Uefa,
    #[serde(rename = "CONMEBOL")]
    Conmebol,
    #[serde(rename = "CONCACAF")]
    Concacaf,
    #[serde(rename = "CAF")]
    Caf,
    #[serde(rename = "AFC")]
    Afc,
    #[serde(rename = "OFC")]
    Ofc,
    /// Intercontinental play-off winner whose confederation is not known yet.
    #[serde(rename = "TBD")]
    Undetermined,
}

impl Confederation {
    /// Maximum number of teams of this confederation in one group.
    /// `None` means the team is exempt from the check.
    pub fn max_per_group(self) -> Option<usize> {
        match self {
            Confederation::Uefa => Some(2),
            Confederation::Undetermined => None,
            _ => Some(1),
        }
    }
}

impl fmt::Display for Confederation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Confederation::Uefa => "UEFA",
            Confederation::Conmebol => "CONMEBOL",
            Confederation::Concacaf => "CONCACAF",
            Confederation::Caf => "CAF",
            Confederation::Afc => "AFC",
            Confederation::Ofc => "OFC",
            Confederation::Undetermined => "TBD",
        };
        f.write_str(s)
    }
}

/// Seeding tier. Pot N always fills slot N-1 of every group.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pot {
    One,
    Two,
    Three,
    Four,
}

impl Pot {
    pub const ALL: [Pot; 4] = [Pot::One, Pot::Two, Pot::Three, Pot::Four];

    /// Slot index this pot is bound to (0..=3).
    pub fn index(self) -> usize {
        match self {
            Pot::One => 0,
            Pot::Two => 1,
            Pot::Three => 2,
            Pot::Four => 3,
        }
    }

    /// 1-based pot number, as printed on the draw sheet.
    pub fn number(self) -> usize {
        self.index() + 1
    }

    pub fn from_index(index: usize) -> Option<Pot> {
        Pot::ALL.get(index).copied()
    }

    pub fn next(self) -> Option<Pot> {
        Pot::from_index(self.index() + 1)
    }
}

impl fmt::Display for Pot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pot {}", self.number())
    }
}

/// A national team taking part in the draw.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    /// Unique across all four pots.
    pub name: String,
    pub confederation: Confederation,
    #[serde(default)]
    pub host: bool,
    /// Stands in for a play-off winner that is not decided yet.
    #[serde(default)]
    pub placeholder: bool,
    pub pot: Pot,
}

impl Team {
    pub fn new(name: impl Into<String>, confederation: Confederation, pot: Pot) -> Self {
        Self {
            name: name.into(),
            confederation,
            host: false,
            placeholder: false,
            pot,
        }
    }

    pub fn host(name: impl Into<String>, confederation: Confederation) -> Self {
        Self {
            host: true,
            ..Self::new(name, confederation, Pot::One)
        }
    }

    pub fn placeholder(name: impl Into<String>, confederation: Confederation, pot: Pot) -> Self {
        Self {
            placeholder: true,
            ..Self::new(name, confederation, pot)
        }
    }

    /// Teams are identified by name.
    pub fn is(&self, name: &str) -> bool {
        self.name == name
    }
}

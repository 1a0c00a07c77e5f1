//! Region roles

use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic role of a text region
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Political history
    Political,
    /// Secular history column
    Secular,
    /// Ecclesiastical history column
    Ecclesiastical,
    /// Footnotes at the bottom of the page
    Footnotes,
    /// Middle region of a three-part page that is neither column
    Misc,
    /// Withheld for manual review
    Unchecked,
}

impl Role {
    /// All roles, in declaration order
    pub const ALL: [Role; 6] = [
        Role::Political,
        Role::Secular,
        Role::Ecclesiastical,
        Role::Footnotes,
        Role::Misc,
        Role::Unchecked,
    ];

    /// Name used in file names and serialized output
    pub fn name(self) -> &'static str {
        match self {
            Role::Political => "political",
            Role::Secular => "secular",
            Role::Ecclesiastical => "ecclesiastical",
            Role::Footnotes => "footnotes",
            Role::Misc => "misc",
            Role::Unchecked => "unchecked",
        }
    }

    /// Look a role up by its name
    pub fn from_name(name: &str) -> Option<Role> {
        Role::ALL.into_iter().find(|role| role.name() == name)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

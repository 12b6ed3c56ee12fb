use serde::{Deserialize, Serialize};
use std::fmt;

/// What the logged-in operator does in the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Business development executive: visits many stores and compiles the
    /// session report, importing counts handed over by BAs.
    #[serde(rename = "BDE")]
    Bde,
    /// Beauty advisor: counts a single store and hands the result over with a
    /// share code.
    #[serde(rename = "BA")]
    Ba,
}

impl Role {
    pub fn label(self) -> &'static str {
        match self {
            Role::Bde => "BDE",
            Role::Ba => "BA",
        }
    }

    /// Parses the label used in forms and query strings.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_uppercase().as_str() {
            "BDE" => Some(Role::Bde),
            "BA" => Some(Role::Ba),
            _ => None,
        }
    }

    /// BAs stay on the review screen after confirming so they can share the
    /// count; BDEs go straight back to the dashboard.
    pub fn shares_after_confirm(self) -> bool {
        matches!(self, Role::Ba)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Identity of the operator who owns the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorInfo {
    #[serde(alias = "bdeName")]
    pub name: String,
    #[serde(default)]
    pub region: String,
    pub role: Role,
}

impl ActorInfo {
    pub fn new(name: &str, region: &str, role: Role) -> Self {
        Self {
            name: name.trim().to_string(),
            region: region.trim().to_string(),
            role,
        }
    }
}

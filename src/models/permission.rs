// file: src/models/permission.rs
// description: Collaborator capability maps and derived access designations
// reference: https://docs.github.com/en/rest/collaborators/collaborators

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub const PULL: &str = "pull";
pub const PUSH: &str = "push";
pub const MAINTAIN: &str = "maintain";
pub const ADMIN: &str = "admin";

/// Permission name to granted-state for one collaborator on one repository.
///
/// Ordered so that rendering and serialization are stable across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapabilityMap(BTreeMap<String, bool>);

impl CapabilityMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, permission: &str, granted: bool) -> Self {
        self.0.insert(permission.to_string(), granted);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Absent permissions count as not granted.
    pub fn granted(&self, permission: &str) -> bool {
        self.0.get(permission).copied().unwrap_or(false)
    }

    pub fn all_granted(&self) -> bool {
        self.0.values().all(|granted| *granted)
    }

    /// True when no key other than `permission` is granted.
    pub fn none_granted_except(&self, permission: &str) -> bool {
        !self
            .0
            .iter()
            .any(|(name, granted)| *granted && name != permission)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.0.iter().map(|(name, granted)| (name.as_str(), *granted))
    }
}

impl FromIterator<(String, bool)> for CapabilityMap {
    fn from_iter<I: IntoIterator<Item = (String, bool)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for CapabilityMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (idx, (name, granted)) in self.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", name, granted)?;
        }
        f.write_str("}")
    }
}

/// Human-readable access tier derived from a [`CapabilityMap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Designation {
    Admin,
    ReadOnly,
    WriteOnly,
    MaintainOnly,
    Unclassified,
}

impl Designation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Designation::Admin => "admin",
            Designation::ReadOnly => "read only",
            Designation::WriteOnly => "write only",
            Designation::MaintainOnly => "maintain only",
            Designation::Unclassified => "unclassified",
        }
    }
}

impl fmt::Display for Designation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

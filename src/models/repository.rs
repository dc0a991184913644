// file: src/models/repository.rs
// description: Repository model as returned by the organization listing
// reference: https://docs.github.com/en/rest/repos/repos#list-organization-repositories

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private,
}

impl Visibility {
    pub fn from_private_flag(private: bool) -> Self {
        if private {
            Visibility::Private
        } else {
            Visibility::Public
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "Public",
            Visibility::Private => "Private",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,

    /// The API reports visibility as a `private` flag.
    pub private: bool,

    /// Raw `updated_at` value. Parsed by the stale detector so a bad or
    /// missing value only excludes this one record from the stale check.
    #[serde(default)]
    pub updated_at: Option<String>,

    /// Canonical API locator, e.g. `https://api.github.com/repos/org/name`.
    pub url: String,

    #[serde(default)]
    pub archived: bool,
}

impl Repository {
    pub fn visibility(&self) -> Visibility {
        Visibility::from_private_flag(self.private)
    }

    pub fn collaborators_url(&self) -> String {
        format!("{}/collaborators", self.url.trim_end_matches('/'))
    }

    pub fn teams_url(&self) -> String {
        format!("{}/teams", self.url.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_api_payload() {
        let payload = serde_json::json!({
            "id": 1296269,
            "name": "Hello-World",
            "full_name": "octocat/Hello-World",
            "private": true,
            "updated_at": "2011-01-26T19:14:43Z",
            "url": "https://api.github.com/repos/octocat/Hello-World",
            "archived": false
        });

        let repo: Repository = serde_json::from_value(payload).unwrap();
        assert_eq!(repo.name, "Hello-World");
        assert_eq!(repo.visibility(), Visibility::Private);
        assert_eq!(
            repo.collaborators_url(),
            "https://api.github.com/repos/octocat/Hello-World/collaborators"
        );
        assert_eq!(
            repo.teams_url(),
            "https://api.github.com/repos/octocat/Hello-World/teams"
        );
    }

    #[test]
    fn test_archived_defaults_to_false() {
        let payload = serde_json::json!({
            "id": 7,
            "name": "tools",
            "private": false,
            "updated_at": "2024-05-01T00:00:00Z",
            "url": "https://api.github.com/repos/acme/tools"
        });

        let repo: Repository = serde_json::from_value(payload).unwrap();
        assert!(!repo.archived);
        assert_eq!(repo.visibility().to_string(), "Public");
    }

    #[test]
    fn test_null_or_missing_updated_at_still_decodes() {
        let payload = serde_json::json!({
            "id": 8,
            "name": "placeholder",
            "private": false,
            "updated_at": null,
            "url": "https://api.github.com/repos/acme/placeholder"
        });
        let repo: Repository = serde_json::from_value(payload).unwrap();
        assert_eq!(repo.updated_at, None);

        let payload = serde_json::json!({
            "id": 9,
            "name": "bare",
            "private": true,
            "url": "https://api.github.com/repos/acme/bare"
        });
        let repo: Repository = serde_json::from_value(payload).unwrap();
        assert_eq!(repo.updated_at, None);
    }
}

// file: src/gateway/mod.rs
// description: remote repository gateway interface and implementations
// reference: internal module structure

pub mod github;
pub mod pagination;

pub use github::GithubGateway;

use crate::error::Result;
use crate::models::{Collaborator, Member, Repository, TeamGrant};

/// Calls the audit needs from the hosting provider.
///
/// Every call returns a typed failure instead of panicking or retrying.
/// Callers decide how to degrade.
#[allow(async_fn_in_trait)]
pub trait RepositoryGateway {
    async fn list_repositories(&self, org: &str) -> Result<Vec<Repository>>;

    async fn list_collaborators(&self, repository: &Repository) -> Result<Vec<Collaborator>>;

    async fn list_teams(&self, repository: &Repository) -> Result<Vec<TeamGrant>>;

    async fn list_members(&self, org: &str) -> Result<Vec<Member>>;

    async fn archive(&self, repository: &Repository) -> Result<()>;
}

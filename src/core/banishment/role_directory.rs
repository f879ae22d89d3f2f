use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RoleError {
    /// The platform refused the change, usually because the bot's role is too low.
    #[error("Missing permissions to modify roles")]
    Forbidden,
    #[error("{0}")]
    Other(String),
}

/// Guild-scoped access to live roles.
///
/// One instance is built per invocation and only ever talks about a single guild.
#[async_trait]
pub trait RoleDirectory: Send + Sync {
    /// Whether `role_id` still exists in the guild.
    fn role_exists(&self, role_id: u64) -> bool;

    async fn add_roles(&self, user_id: u64, role_ids: &[u64], reason: &str)
        -> Result<(), RoleError>;

    async fn remove_roles(
        &self,
        user_id: u64,
        role_ids: &[u64],
        reason: &str,
    ) -> Result<(), RoleError>;
}

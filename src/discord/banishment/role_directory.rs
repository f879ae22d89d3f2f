// Serenity-backed role directory for a single guild.

use crate::core::banishment::{RoleDirectory, RoleError};
use async_trait::async_trait;
use serenity::all::{GuildId, Http, RoleId, UserId};
use std::collections::HashSet;
use std::sync::Arc;

pub struct GuildRoleDirectory {
    http: Arc<Http>,
    guild_id: GuildId,
    /// Role ids present in the guild when the command was invoked.
    known_roles: HashSet<u64>,
}

impl GuildRoleDirectory {
    pub fn new(http: Arc<Http>, guild_id: u64, known_roles: HashSet<u64>) -> Self {
        Self {
            http,
            guild_id: GuildId::new(guild_id),
            known_roles,
        }
    }
}

/// Map a serenity failure onto the two cases the service cares about.
fn classify(err: serenity::Error) -> RoleError {
    if let serenity::Error::Http(http_err) = &err {
        if http_err.status_code().map(|code| code.as_u16()) == Some(403) {
            return RoleError::Forbidden;
        }
    }
    RoleError::Other(err.to_string())
}

#[async_trait]
impl RoleDirectory for GuildRoleDirectory {
    fn role_exists(&self, role_id: u64) -> bool {
        self.known_roles.contains(&role_id)
    }

    async fn add_roles(
        &self,
        user_id: u64,
        role_ids: &[u64],
        reason: &str,
    ) -> Result<(), RoleError> {
        for &role_id in role_ids {
            self.http
                .add_member_role(
                    self.guild_id,
                    UserId::new(user_id),
                    RoleId::new(role_id),
                    Some(reason),
                )
                .await
                .map_err(classify)?;
        }
        Ok(())
    }

    async fn remove_roles(
        &self,
        user_id: u64,
        role_ids: &[u64],
        reason: &str,
    ) -> Result<(), RoleError> {
        for &role_id in role_ids {
            self.http
                .remove_member_role(
                    self.guild_id,
                    UserId::new(user_id),
                    RoleId::new(role_id),
                    Some(reason),
                )
                .await
                .map_err(classify)?;
        }
        Ok(())
    }
}

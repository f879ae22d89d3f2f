// Banishment service - strips a member's roles behind a muted role and
// gives them back later.
//
// Ordering matters here and is deliberate:
// - banish writes the ledger BEFORE touching roles, so a failed mutation
//   can leave a member marked banished with their roles only partly changed.
// - unbanish pops the ledger entry BEFORE restoring roles, so a failed
//   restoration still clears the banished mark.
// Both are accepted best-effort inconsistencies.

use super::banishment_models::{
    BanishRequest, Banished, BanishmentConfig, BanishmentRecord, UnbanishRequest, Unbanished,
};
use super::banishment_store::{BanishmentStore, StoreError};
use super::role_directory::{RoleDirectory, RoleError};
use thiserror::Error;

// ============================================================================
// ERRORS
// ============================================================================

/// Every way a command can end short of success.
///
/// The `Display` text of each variant is exactly what gets sent to chat.
#[derive(Debug, Error)]
pub enum BanishmentError {
    #[error("You cannot banish yourself.")]
    SelfTarget,

    #[error("You cannot banish the server owner.")]
    OwnerTarget,

    #[error("You cannot banish someone with an equal or higher role than you.")]
    OutranksInvoker,

    #[error("I cannot banish this user. Their role is higher than mine.")]
    OutranksBot,

    #[error("Error: The 'Muted' role with ID `{0}` was not found on this server. Please create it or check the ID.")]
    MutedRoleMissing(u64),

    #[error("Error: The 'Muted' role with ID `{0}` was not found on this server. I cannot complete the unbanish process without it.")]
    MutedRoleMissingForUnbanish(u64),

    #[error("<@{0}> is already banished.")]
    AlreadyBanished(u64),

    #[error("<@{0}> is not currently banished.")]
    NotBanished(u64),

    #[error("Could not find role data for this user. Cannot restore roles.")]
    MissingRoleData,

    #[error("I do not have permissions to modify this user's roles. My role may be too low in the hierarchy.")]
    BanishForbidden,

    #[error("I do not have permissions to modify this user's roles. My role may be too low in the hierarchy. Their roles were not restored, but they are no longer marked as banished.")]
    UnbanishForbidden,

    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

impl From<StoreError> for BanishmentError {
    fn from(err: StoreError) -> Self {
        BanishmentError::Unexpected(err.to_string())
    }
}

// ============================================================================
// CORE SERVICE
// ============================================================================

pub struct BanishmentService<S: BanishmentStore> {
    store: S,
    config: BanishmentConfig,
}

impl<S: BanishmentStore> BanishmentService<S> {
    pub fn new(store: S, config: BanishmentConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &BanishmentConfig {
        &self.config
    }

    /// Save the target's roles to the ledger, strip them and apply the muted role.
    ///
    /// Preconditions are checked in a fixed order and the first failure wins.
    pub async fn banish<D: RoleDirectory>(
        &self,
        roles: &D,
        request: &BanishRequest,
    ) -> Result<Banished, BanishmentError> {
        let invoker = &request.invoker;
        let target = &request.target;

        if target.user_id == invoker.user_id {
            return Err(BanishmentError::SelfTarget);
        }
        if target.user_id == request.owner_id {
            return Err(BanishmentError::OwnerTarget);
        }
        // The owner is above the hierarchy check
        if invoker.user_id != request.owner_id && target.top_role >= invoker.top_role {
            return Err(BanishmentError::OutranksInvoker);
        }
        if target.top_role >= request.bot_top_role {
            return Err(BanishmentError::OutranksBot);
        }

        let muted_role_id = self.config.muted_role_id;
        if !roles.role_exists(muted_role_id) {
            return Err(BanishmentError::MutedRoleMissing(muted_role_id));
        }

        if self
            .store
            .get_record(request.guild_id, target.user_id)
            .await?
            .is_some()
        {
            return Err(BanishmentError::AlreadyBanished(target.user_id));
        }

        // The everyone role shares the guild id and can't be removed
        let saved_role_ids: Vec<u64> = target
            .role_ids
            .iter()
            .copied()
            .filter(|&id| id != request.guild_id)
            .collect();

        self.store
            .save_record(
                request.guild_id,
                target.user_id,
                BanishmentRecord::with_roles(saved_role_ids.clone()),
            )
            .await?;

        let reason = format!("Banished by {}", invoker.display_name);
        let mutation = async {
            roles
                .remove_roles(target.user_id, &saved_role_ids, &reason)
                .await?;
            roles
                .add_roles(target.user_id, &[muted_role_id], &reason)
                .await?;
            Ok::<(), RoleError>(())
        };
        if let Err(err) = mutation.await {
            tracing::warn!(
                guild_id = request.guild_id,
                user_id = target.user_id,
                "Banish role change failed after ledger write: {}",
                err
            );
            return Err(match err {
                RoleError::Forbidden => BanishmentError::BanishForbidden,
                RoleError::Other(msg) => BanishmentError::Unexpected(msg),
            });
        }

        tracing::info!(
            guild_id = request.guild_id,
            user_id = target.user_id,
            invoker_id = invoker.user_id,
            saved_roles = saved_role_ids.len(),
            "Member banished"
        );

        Ok(Banished {
            user_id: target.user_id,
            saved_role_ids,
        })
    }

    /// Pop the target's ledger entry and give back whichever saved roles still exist.
    pub async fn unbanish<D: RoleDirectory>(
        &self,
        roles: &D,
        request: &UnbanishRequest,
    ) -> Result<Unbanished, BanishmentError> {
        let target = &request.target;

        let muted_role_id = self.config.muted_role_id;
        if !roles.role_exists(muted_role_id) {
            return Err(BanishmentError::MutedRoleMissingForUnbanish(muted_role_id));
        }

        let record = self
            .store
            .take_record(request.guild_id, target.user_id)
            .await?
            .ok_or(BanishmentError::NotBanished(target.user_id))?;

        let saved_role_ids = record
            .saved_role_ids
            .ok_or(BanishmentError::MissingRoleData)?;

        let (restored_role_ids, dropped_role_ids): (Vec<u64>, Vec<u64>) = saved_role_ids
            .into_iter()
            .partition(|&id| roles.role_exists(id));

        if !dropped_role_ids.is_empty() {
            tracing::debug!(
                guild_id = request.guild_id,
                user_id = target.user_id,
                ?dropped_role_ids,
                "Skipping saved roles that no longer exist"
            );
        }

        let reason = format!("Unbanished by {}", request.invoker.display_name);
        let mutation = async {
            roles
                .add_roles(target.user_id, &restored_role_ids, &reason)
                .await?;
            if target.has_role(muted_role_id) {
                roles
                    .remove_roles(target.user_id, &[muted_role_id], &reason)
                    .await?;
            }
            Ok::<(), RoleError>(())
        };
        if let Err(err) = mutation.await {
            tracing::warn!(
                guild_id = request.guild_id,
                user_id = target.user_id,
                "Unbanish role change failed after ledger removal: {}",
                err
            );
            return Err(match err {
                RoleError::Forbidden => BanishmentError::UnbanishForbidden,
                RoleError::Other(msg) => BanishmentError::Unexpected(msg),
            });
        }

        tracing::info!(
            guild_id = request.guild_id,
            user_id = target.user_id,
            invoker_id = request.invoker.user_id,
            restored_roles = restored_role_ids.len(),
            "Member unbanished"
        );

        Ok(Unbanished {
            user_id: target.user_id,
            restored_role_ids,
            dropped_role_ids,
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================

// Translate cached guild state into the plain snapshots the core works on.

use crate::core::banishment::{BanishRequest, MemberSnapshot, RoleRank, UnbanishRequest};
use crate::discord::Context;
use poise::serenity_prelude as serenity;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("this command can only be used in a server")]
    NotInGuild,

    #[error("server data is not available yet, try again shortly")]
    GuildNotCached,

    #[error(transparent)]
    Http(#[from] ::serenity::Error),
}

/// Guild state captured once per invocation.
pub struct GuildSnapshot {
    pub guild_id: u64,
    pub owner_id: u64,
    pub role_ids: HashSet<u64>,
    pub invoker: MemberSnapshot,
    pub target: MemberSnapshot,
    pub bot_top_role: RoleRank,
}

impl GuildSnapshot {
    pub async fn capture(
        ctx: Context<'_>,
        target: &serenity::Member,
    ) -> Result<Self, SnapshotError> {
        let guild_id = ctx.guild_id().ok_or(SnapshotError::NotInGuild)?;
        let invoker = ctx
            .author_member()
            .await
            .ok_or(SnapshotError::NotInGuild)?
            .into_owned();
        let bot = guild_id
            .member(ctx.serenity_context(), ctx.framework().bot_id)
            .await?;

        // The cache guard isn't Send, so nothing below may await
        let guild = ctx.guild().ok_or(SnapshotError::GuildNotCached)?;

        let ranks: HashMap<u64, RoleRank> = guild
            .roles
            .values()
            .map(|role| (role.id.get(), RoleRank::new(role.position, role.id.get())))
            .collect();

        let snapshot = |member: &serenity::Member| {
            let role_ids: Vec<u64> = member.roles.iter().map(|id| id.get()).collect();
            MemberSnapshot {
                user_id: member.user.id.get(),
                display_name: member.display_name().to_string(),
                top_role: top_role_rank(guild_id.get(), &ranks, &role_ids),
                role_ids,
            }
        };

        let invoker = snapshot(&invoker);
        let target = snapshot(target);
        let bot_top_role = snapshot(&bot).top_role;

        Ok(Self {
            guild_id: guild_id.get(),
            owner_id: guild.owner_id.get(),
            role_ids: ranks.keys().copied().collect(),
            invoker,
            target,
            bot_top_role,
        })
    }

    pub fn banish_request(&self) -> BanishRequest {
        BanishRequest {
            guild_id: self.guild_id,
            owner_id: self.owner_id,
            invoker: self.invoker.clone(),
            target: self.target.clone(),
            bot_top_role: self.bot_top_role,
        }
    }

    pub fn unbanish_request(&self) -> UnbanishRequest {
        UnbanishRequest {
            guild_id: self.guild_id,
            invoker: self.invoker.clone(),
            target: self.target.clone(),
        }
    }
}

/// Highest of the member's roles the guild still knows about.
/// A member with no known roles ranks as the everyone role.
pub fn top_role_rank(
    guild_id: u64,
    ranks: &HashMap<u64, RoleRank>,
    member_role_ids: &[u64],
) -> RoleRank {
    member_role_ids
        .iter()
        .filter_map(|id| ranks.get(id))
        .copied()
        .max()
        .unwrap_or_else(|| RoleRank::everyone(guild_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    const GUILD: u64 = 1000;

    fn ranks() -> HashMap<u64, RoleRank> {
        [
            (GUILD, RoleRank::everyone(GUILD)),
            (10, RoleRank::new(1, 10)),
            (20, RoleRank::new(5, 20)),
            (30, RoleRank::new(5, 30)),
            (40, RoleRank::new(9, 40)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_highest_position_wins() {
        let top = top_role_rank(GUILD, &ranks(), &[10, 40, 20]);
        assert_eq!(top, RoleRank::new(9, 40));
    }

    #[test]
    fn test_unknown_roles_are_ignored() {
        let top = top_role_rank(GUILD, &ranks(), &[999, 10]);
        assert_eq!(top, RoleRank::new(1, 10));
    }

    #[test]
    fn test_no_roles_ranks_as_everyone() {
        let everyone = RoleRank::everyone(GUILD);
        assert_eq!(top_role_rank(GUILD, &ranks(), &[]), everyone);
        assert_eq!(top_role_rank(GUILD, &ranks(), &[999]), everyone);
    }

    #[test]
    fn test_equal_positions_prefer_older_role() {
        let top = top_role_rank(GUILD, &ranks(), &[30, 20]);
        assert_eq!(top, RoleRank::new(5, 20));
    }
}

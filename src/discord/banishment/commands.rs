// Banishment commands.
//
// Same thin pattern as the other command files:
// 1. Guard (invoker's role, then the bot's Manage Roles permission)
// 2. Snapshot Discord state into core types
// 3. Call the core service
// 4. Reply with whatever came back - every outcome ends as a chat message

use super::guard::ensure_allowed;
use super::role_directory::GuildRoleDirectory;
use super::snapshot::GuildSnapshot;
use crate::core::banishment::BanishmentError;
use crate::discord::{Context, Error};
use poise::serenity_prelude as serenity;

/// Removes all roles from a user and gives them a Muted role.
#[poise::command(prefix_command, slash_command, guild_only)]
pub async fn banish(
    ctx: Context<'_>,
    #[description = "Member to banish"] member: serenity::Member,
) -> Result<(), Error> {
    if !ensure_allowed(ctx).await? {
        return Ok(());
    }

    let snapshot = match GuildSnapshot::capture(ctx, &member).await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            ctx.say(BanishmentError::Unexpected(e.to_string()).to_string())
                .await?;
            return Ok(());
        }
    };

    let roles = role_directory(ctx, &snapshot);
    let reply = match ctx
        .data()
        .banishment
        .banish(&roles, &snapshot.banish_request())
        .await
    {
        Ok(banished) => banished.confirmation(),
        Err(e) => e.to_string(),
    };

    ctx.say(reply).await?;
    Ok(())
}

/// Restores a banished user's roles and removes the Muted role.
#[poise::command(prefix_command, slash_command, guild_only)]
pub async fn unbanish(
    ctx: Context<'_>,
    #[description = "Member to unbanish"] member: serenity::Member,
) -> Result<(), Error> {
    if !ensure_allowed(ctx).await? {
        return Ok(());
    }

    let snapshot = match GuildSnapshot::capture(ctx, &member).await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            ctx.say(BanishmentError::Unexpected(e.to_string()).to_string())
                .await?;
            return Ok(());
        }
    };

    let roles = role_directory(ctx, &snapshot);
    let reply = match ctx
        .data()
        .banishment
        .unbanish(&roles, &snapshot.unbanish_request())
        .await
    {
        Ok(unbanished) => unbanished.confirmation(),
        Err(e) => e.to_string(),
    };

    ctx.say(reply).await?;
    Ok(())
}

fn role_directory(ctx: Context<'_>, snapshot: &GuildSnapshot) -> GuildRoleDirectory {
    GuildRoleDirectory::new(
        ctx.serenity_context().http.clone(),
        snapshot.guild_id,
        snapshot.role_ids.clone(),
    )
}

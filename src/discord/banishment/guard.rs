// Explicit authorization guard, called first thing in each banishment command.

use crate::core::banishment::check_gate;
use crate::discord::{Context, Error};

/// Returns `false` (after telling the invoker why) when the command may not run.
pub async fn ensure_allowed(ctx: Context<'_>) -> Result<bool, Error> {
    let role_ids: Option<Vec<u64>> = ctx
        .author_member()
        .await
        .map(|member| member.roles.iter().map(|id| id.get()).collect());
    let bot_can_manage_roles = bot_can_manage_roles(ctx).await;

    match check_gate(
        ctx.data().banishment.config(),
        role_ids.as_deref(),
        bot_can_manage_roles,
    ) {
        Ok(()) => Ok(true),
        Err(denial) => {
            tracing::debug!(
                user_id = ctx.author().id.get(),
                "Banishment command refused: {:?}",
                denial
            );
            ctx.say(denial.to_string()).await?;
            Ok(false)
        }
    }
}

async fn bot_can_manage_roles(ctx: Context<'_>) -> bool {
    let Some(guild_id) = ctx.guild_id() else {
        return false;
    };
    let Ok(bot) = guild_id
        .member(ctx.serenity_context(), ctx.framework().bot_id)
        .await
    else {
        return false;
    };

    ctx.guild()
        .map(|guild| guild.member_permissions(&bot).manage_roles())
        .unwrap_or(false)
}

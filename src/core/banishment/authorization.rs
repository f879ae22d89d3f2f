// Authorization gate for the banishment commands.

use super::banishment_models::BanishmentConfig;
use thiserror::Error;

/// Reply sent to anyone who fails the gate.
pub const UNWORTHY_MESSAGE: &str = "You are not worthy of the Throne.";

/// Why an invocation was refused before any banishment logic ran.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GateDenial {
    #[error("{}", UNWORTHY_MESSAGE)]
    Unworthy,
    #[error("I need the Manage Roles permission to do that.")]
    BotCannotManageRoles,
}

/// `invoker_role_ids` is `None` when the command was not invoked inside a guild.
pub fn is_worthy(config: &BanishmentConfig, invoker_role_ids: Option<&[u64]>) -> bool {
    match invoker_role_ids {
        Some(role_ids) => role_ids.contains(&config.required_role_id),
        None => false,
    }
}

/// Gate order: the invoker's role first, then the bot's own permission.
/// An unworthy invoker is always told so, whatever the bot can do.
pub fn check_gate(
    config: &BanishmentConfig,
    invoker_role_ids: Option<&[u64]>,
    bot_can_manage_roles: bool,
) -> Result<(), GateDenial> {
    if !is_worthy(config, invoker_role_ids) {
        return Err(GateDenial::Unworthy);
    }
    if !bot_can_manage_roles {
        return Err(GateDenial::BotCannotManageRoles);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: BanishmentConfig = BanishmentConfig {
        required_role_id: 42,
        muted_role_id: 7,
    };

    #[test]
    fn test_member_with_required_role_passes() {
        assert!(is_worthy(&CONFIG, Some(&[1, 42, 3])));
        assert_eq!(check_gate(&CONFIG, Some(&[1, 42, 3]), true), Ok(()));
    }

    #[test]
    fn test_member_without_required_role_fails() {
        assert!(!is_worthy(&CONFIG, Some(&[1, 2, 3])));
        assert!(!is_worthy(&CONFIG, Some(&[])));
    }

    #[test]
    fn test_outside_guild_fails() {
        assert!(!is_worthy(&CONFIG, None));
        assert_eq!(check_gate(&CONFIG, None, true), Err(GateDenial::Unworthy));
    }

    #[test]
    fn test_unworthy_invoker_is_told_even_when_bot_lacks_permission() {
        let denial = check_gate(&CONFIG, Some(&[1, 2]), false).unwrap_err();
        assert_eq!(denial, GateDenial::Unworthy);
        assert_eq!(denial.to_string(), UNWORTHY_MESSAGE);
    }

    #[test]
    fn test_worthy_invoker_hits_bot_permission_check() {
        let denial = check_gate(&CONFIG, Some(&[42]), false).unwrap_err();
        assert_eq!(denial, GateDenial::BotCannotManageRoles);
        assert_eq!(
            denial.to_string(),
            "I need the Manage Roles permission to do that."
        );
    }
}

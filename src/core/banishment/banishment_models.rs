// Banishment domain models.
//
// Pure data - the Discord layer builds these from the cache before calling
// into the service, so nothing here knows about serenity.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Process-wide configuration, fixed at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BanishmentConfig {
    /// Role a member must hold to use `banish` / `unbanish`.
    pub required_role_id: u64,
    /// Role applied to banished members in place of their normal roles.
    pub muted_role_id: u64,
}

/// What the ledger keeps for a banished member.
///
/// `saved_role_ids` is optional on the wire so that a damaged record can be
/// told apart from a member who simply had no roles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BanishmentRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_role_ids: Option<Vec<u64>>,
}

impl BanishmentRecord {
    pub fn with_roles(role_ids: Vec<u64>) -> Self {
        Self {
            saved_role_ids: Some(role_ids),
        }
    }
}

/// A role's place in the guild hierarchy.
///
/// Higher position outranks lower. At equal positions the older role
/// (smaller snowflake) outranks the newer one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleRank {
    pub position: u16,
    pub role_id: u64,
}

impl RoleRank {
    pub fn new(position: u16, role_id: u64) -> Self {
        Self { position, role_id }
    }

    /// Rank of the implicit everyone role, which shares the guild's id.
    pub fn everyone(guild_id: u64) -> Self {
        Self {
            position: 0,
            role_id: guild_id,
        }
    }
}

impl Ord for RoleRank {
    fn cmp(&self, other: &Self) -> Ordering {
        self.position
            .cmp(&other.position)
            .then_with(|| other.role_id.cmp(&self.role_id))
    }
}

impl PartialOrd for RoleRank {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Snapshot of a guild member taken when the command was invoked.
#[derive(Debug, Clone)]
pub struct MemberSnapshot {
    pub user_id: u64,
    pub display_name: String,
    /// Role ids in the order the platform reported them.
    pub role_ids: Vec<u64>,
    pub top_role: RoleRank,
}

impl MemberSnapshot {
    pub fn has_role(&self, role_id: u64) -> bool {
        self.role_ids.contains(&role_id)
    }
}

/// Everything `banish` needs to know about the guild at invocation time.
#[derive(Debug, Clone)]
pub struct BanishRequest {
    pub guild_id: u64,
    pub owner_id: u64,
    pub invoker: MemberSnapshot,
    pub target: MemberSnapshot,
    /// The bot's own highest role in this guild.
    pub bot_top_role: RoleRank,
}

/// Everything `unbanish` needs to know about the guild at invocation time.
#[derive(Debug, Clone)]
pub struct UnbanishRequest {
    pub guild_id: u64,
    pub invoker: MemberSnapshot,
    pub target: MemberSnapshot,
}

/// Successful banishment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banished {
    pub user_id: u64,
    pub saved_role_ids: Vec<u64>,
}

impl Banished {
    pub fn confirmation(&self) -> String {
        format!(
            "It has succeeded and that <@{}> has been banished to the corner.",
            self.user_id
        )
    }
}

/// Successful unbanishment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unbanished {
    pub user_id: u64,
    pub restored_role_ids: Vec<u64>,
    /// Saved ids that no longer exist in the guild.
    pub dropped_role_ids: Vec<u64>,
}

impl Unbanished {
    pub fn confirmation(&self) -> String {
        format!(
            "It was successful. <@{}> has been unbanished and their roles restored.",
            self.user_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_orders_by_position_first() {
        let low = RoleRank::new(1, 10);
        let high = RoleRank::new(5, 99);
        assert!(high > low);
    }

    #[test]
    fn test_rank_tie_favours_older_role() {
        let older = RoleRank::new(3, 100);
        let newer = RoleRank::new(3, 200);
        assert!(older > newer);
        assert_eq!(older.cmp(&older), Ordering::Equal);
    }

    #[test]
    fn test_everyone_is_lowest() {
        let everyone = RoleRank::everyone(1);
        assert!(RoleRank::new(1, 2) > everyone);
    }

    #[test]
    fn test_record_without_roles_field_decodes_as_malformed() {
        let record: BanishmentRecord = serde_json::from_str("{}").unwrap();
        assert_eq!(record.saved_role_ids, None);

        let record: BanishmentRecord =
            serde_json::from_str(r#"{"saved_role_ids":[3,1,2]}"#).unwrap();
        assert_eq!(record.saved_role_ids, Some(vec![3, 1, 2]));
    }
}

// Discord layer - commands and the serenity adapters behind them.

#[path = "banishment/mod.rs"]
pub mod banishment;

use crate::core::banishment::BanishmentService;
use crate::infra::banishment::SqliteBanishmentStore;
use std::sync::Arc;

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;

/// Shared state handed to every command.
pub struct Data {
    pub banishment: Arc<BanishmentService<SqliteBanishmentStore>>,
}

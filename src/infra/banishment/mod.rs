// Ledger implementations for the banishment system.

#[cfg(test)]
pub mod in_memory;
pub mod sqlite_store;

#[cfg(test)]
pub use in_memory::InMemoryBanishmentStore;
pub use sqlite_store::SqliteBanishmentStore;

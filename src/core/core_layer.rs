// The core module contains all business logic.
// Each feature gets its own submodule.

#[path = "banishment/mod.rs"]
pub mod banishment;

// Discord side of the banishment system.

pub mod commands;
pub mod guard;
pub mod role_directory;
pub mod snapshot;

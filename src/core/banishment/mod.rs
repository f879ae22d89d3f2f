// Core banishment module - role stripping and restoration.
// Same layout as the other core features: models, ports, service.

pub mod authorization;
pub mod banishment_models;
pub mod banishment_service;
pub mod banishment_store;
pub mod role_directory;

pub use authorization::*;
pub use banishment_models::*;
pub use banishment_service::*;
pub use banishment_store::*;
pub use role_directory::*;

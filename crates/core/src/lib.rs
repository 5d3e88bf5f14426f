//! # Slotbook Core
//!
//! Domain types and scheduling rules for therapist availability slots.
//!
//! - [`gateway`] persists a provider's slot list through a [`store::KeyValueStore`]
//! - [`policy`] enforces overlap and booking rules on top of the gateway
//! - [`validation`] holds the input checks shared by the HTTP and CLI fronts

pub mod errors;
pub mod gateway;
pub mod models;
pub mod policy;
pub mod store;
pub mod validation;

pub use gateway::SlotGateway;
pub use policy::SlotPolicy;
pub use store::{KeyValueStore, MemoryStore};

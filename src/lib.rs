//! handover-core: make-before-break primary connection switching
//!
//! A control-plane state machine that promotes a freshly validated secondary
//! connection to the primary data path while demoting the previous primary,
//! instead of tearing the old one down first. The fleet of connection
//! managers lives outside this crate; it is reached through the
//! [`ConnectionFleet`] trait and drives the coordinator with [`FleetEvent`]s:
//! - Manager added/removed/role-changed lifecycle events
//! - Connection validated events that start a handover
//!
//! All state mutation happens on one serialized event path (a single
//! [`HandoverCoordinator::run`] consumer task), so each event is fully
//! processed before the next begins.

mod config;
pub mod fleet;
pub mod handover;

pub use config::{ConfigError, HandoverConfig};
pub use fleet::{ConnectionFleet, ConnectionRole, FleetEvent, ManagerId, RoleChangeRequestor};
pub use handover::{HandoverCoordinator, HandoverSignal, TransitionRecord};

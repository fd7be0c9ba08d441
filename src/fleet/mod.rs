//! Connection fleet interface
//!
//! The fleet of connection managers lives outside this crate. It owns every
//! manager, is the sole writer of actual role state, and notifies the
//! coordinator of lifecycle changes through [`FleetEvent`]s. This module
//! defines the seam: manager identity, roles, and the query/request surface
//! the coordinator needs.

pub mod event;

pub use event::FleetEvent;

use std::fmt;

/// Stable identity of one managed connection. The fleet owns the manager
/// itself; the coordinator only ever holds ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ManagerId(pub u64);

impl fmt::Display for ManagerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "manager-{}", self.0)
    }
}

/// Role a connection manager currently holds within the fleet.
///
/// The fleet guarantees at most one `Primary` at a time. Roles outside this
/// crate's concern (long-lived secondaries, unassigned managers) collapse
/// into `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionRole {
    /// The single active data path for the device.
    Primary,
    /// Temporary non-primary role, typically mid-establishment or
    /// mid-handover.
    SecondaryTransient,
    /// Any role this coordinator does not act on.
    Other,
}

/// Requestor context attached to a role-change request, so the fleet can
/// attribute the change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleChangeRequestor {
    /// The system settings authority (promotions, recovery).
    System,
    /// The handover coordinator itself (mid-handover demotion).
    Handover,
}

/// Query and request surface of the connection fleet.
///
/// Requests are asynchronous and unconfirmed: `request_role_change` and
/// `request_stop` return immediately and their effect is only observable
/// through a later [`FleetEvent`] on the same serialized stream. There is
/// always a window where a manager's requested role and actual role differ.
pub trait ConnectionFleet: Send + Sync {
    /// Runtime feature flag. When false the coordinator ignores every event.
    fn is_handover_enabled(&self) -> bool;

    /// The manager currently holding [`ConnectionRole::Primary`], if any.
    fn current_primary(&self) -> Option<ManagerId>;

    /// All managers currently holding `role`, in fleet enumeration order.
    /// That order is the deterministic tie-break used by primary recovery.
    fn managers_in_role(&self, role: ConnectionRole) -> Vec<ManagerId>;

    /// Current role of `id`, or `None` if the fleet no longer knows it.
    fn role_of(&self, id: ManagerId) -> Option<ConnectionRole>;

    /// Ask the fleet to move `id` to `role`. Fire-and-forget; confirmation
    /// arrives later as [`FleetEvent::RoleChanged`].
    fn request_role_change(&self, id: ManagerId, role: ConnectionRole, requestor: RoleChangeRequestor);

    /// Ask the fleet to stop `id`. Fire-and-forget.
    fn request_stop(&self, id: ManagerId);

    /// Mark `id` as a non-preferred fallback for connection scoring while it
    /// winds down.
    fn mark_deprioritized(&self, id: ManagerId);
}

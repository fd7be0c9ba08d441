//! Fleet lifecycle events consumed by the coordinator.

use super::ManagerId;

/// Events emitted by the fleet for the coordinator to process, delivered in
/// arrival order through one serialized channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FleetEvent {
    /// A connection manager joined the fleet.
    ManagerAdded(ManagerId),
    /// A connection manager left the fleet.
    ManagerRemoved(ManagerId),
    /// A manager's role changed. This is also how an earlier role-change
    /// request is confirmed.
    RoleChanged(ManagerId),
    /// A manager's connection passed validation and is usable as a data path.
    ConnectionValidated(ManagerId),
}

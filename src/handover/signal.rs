//! Outbound notifications emitted by the coordinator.

/// Signals sent to downstream collaborators over the signal channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandoverSignal {
    /// Observers bound to "the primary connection" should treat it as
    /// disconnected. Emitted the moment the old primary is demoted, because
    /// once demoted it stops producing real updates for those observers.
    SyntheticDisconnect,
    /// A hold placed for the duration of the handover (e.g. a reservation
    /// preventing new connection requests) may be released. Emitted only on
    /// successful completion.
    ReservationReleased,
}

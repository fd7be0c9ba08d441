//! Handover coordinator — serialized event dispatch over the fleet.
//!
//! Reacts to fleet lifecycle events, runs the primary recovery failsafe,
//! starts a handover when a secondary is validated, and completes or aborts
//! the in-flight attempt. The `Option<TransitionRecord>` owned here is the
//! only mutable state; every mutation happens inside `handle_event`.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::config::HandoverConfig;
use crate::fleet::{
    ConnectionFleet, ConnectionRole, FleetEvent, ManagerId, RoleChangeRequestor,
};
use crate::handover::record::TransitionRecord;
use crate::handover::signal::HandoverSignal;

/// Coordinates make-before-break switching of the primary connection.
pub struct HandoverCoordinator {
    fleet: Arc<dyn ConnectionFleet>,
    signals: mpsc::UnboundedSender<HandoverSignal>,
    config: HandoverConfig,
    in_flight: Option<TransitionRecord>,
    verbose: bool,
}

impl HandoverCoordinator {
    pub fn new(
        config: HandoverConfig,
        fleet: Arc<dyn ConnectionFleet>,
        signals: mpsc::UnboundedSender<HandoverSignal>,
    ) -> Self {
        let verbose = config.verbose_logging;
        Self {
            fleet,
            signals,
            config,
            in_flight: None,
            verbose,
        }
    }

    /// Create the bounded fleet event channel sized from config.
    pub fn event_channel(
        config: &HandoverConfig,
    ) -> (mpsc::Sender<FleetEvent>, mpsc::Receiver<FleetEvent>) {
        mpsc::channel(config.event_queue_depth.max(1))
    }

    /// Toggle per-event debug traces.
    pub fn set_verbose_logging(&mut self, enabled: bool) {
        self.verbose = enabled;
    }

    /// The in-flight transition, if any. Diagnostics only; not part of the
    /// operational contract.
    pub fn transition_in_flight(&self) -> Option<&TransitionRecord> {
        self.in_flight.as_ref()
    }

    /// Run the coordinator event loop.
    ///
    /// Consumes fleet events in arrival order until every sender is dropped.
    /// This single consumer task is what serializes access to the record:
    /// each event is fully processed before the next is received.
    pub async fn run(mut self, mut events: mpsc::Receiver<FleetEvent>) {
        while let Some(event) = events.recv().await {
            self.handle_event(event);
        }
        debug!("Fleet event channel closed, coordinator stopping");
    }

    /// Process one fleet event. The sole entry point that mutates the
    /// transition record; callers bypassing [`run`](Self::run) must provide
    /// their own serialization.
    pub fn handle_event(&mut self, event: FleetEvent) {
        if !self.enabled() {
            return;
        }
        if self.verbose {
            debug!(?event, "Dispatching fleet event");
        }
        match event {
            FleetEvent::ManagerAdded(_) => {
                // A newly added manager could already be the fleet's sole
                // recoverable candidate.
                self.recover_primary();
            }
            FleetEvent::ManagerRemoved(id) => self.on_manager_removed(id),
            FleetEvent::RoleChanged(id) => {
                self.recover_primary();
                self.maybe_continue(id);
            }
            FleetEvent::ConnectionValidated(id) => self.on_connection_validated(id),
        }
    }

    fn enabled(&self) -> bool {
        self.config.enabled && self.fleet.is_handover_enabled()
    }

    /// Failsafe: if there is no primary manager but there exists exactly one
    /// `SecondaryTransient`, or multiple and no handover is in flight (to
    /// avoid interfering with it), promote one. Tie-break among multiple
    /// candidates is first in fleet enumeration order; the rest are stopped.
    fn recover_primary(&mut self) {
        // already have a primary, do nothing
        if self.fleet.current_primary().is_some() {
            return;
        }
        let candidates = self
            .fleet
            .managers_in_role(ConnectionRole::SecondaryTransient);
        if candidates.is_empty() {
            return;
        }
        if candidates.len() > 1 && self.in_flight.is_some() {
            // the active handover will resolve the ambiguity itself
            return;
        }
        let chosen = candidates[0];
        self.fleet.request_role_change(
            chosen,
            ConnectionRole::Primary,
            RoleChangeRequestor::System,
        );
        info!(
            %chosen,
            extras = candidates.len() - 1,
            "Primary recovery: promoting candidate and stopping other transient secondaries"
        );
        for extra in &candidates[1..] {
            self.fleet.request_stop(*extra);
        }
    }

    /// A connection passed validation. If it is a transient secondary and a
    /// primary exists, begin the handover: demote the current primary and
    /// install the transition record. The candidate is never promoted here;
    /// promotion waits for the old primary's demotion to be confirmed by a
    /// later `RoleChanged` event (see [`maybe_continue`](Self::maybe_continue)).
    fn on_connection_validated(&mut self, candidate: ManagerId) {
        if self.fleet.role_of(candidate) != Some(ConnectionRole::SecondaryTransient) {
            return;
        }

        let Some(current_primary) = self.fleet.current_primary() else {
            // Anomalous: the primary vanished between validation and now.
            // Promote directly, no record needed.
            error!(%candidate, "No current primary at validation, promoting directly");
            self.fleet.request_role_change(
                candidate,
                ConnectionRole::Primary,
                RoleChangeRequestor::System,
            );
            return;
        };

        info!(
            old_primary = %current_primary,
            new_primary = %candidate,
            "Starting handover: demoting current primary to secondary-transient"
        );
        self.fleet.request_role_change(
            current_primary,
            ConnectionRole::SecondaryTransient,
            RoleChangeRequestor::Handover,
        );
        // Send the synthetic disconnect immediately: once the old primary is
        // demoted, observers bound to "the primary connection" stop receiving
        // its real updates, so they must see a disconnect now.
        self.send_signal(HandoverSignal::SyntheticDisconnect);

        if let Some(previous) = self.in_flight.replace(TransitionRecord {
            old_primary: current_primary,
            new_primary: candidate,
        }) {
            warn!(%previous, "Replacing in-flight transition with new attempt");
        }
    }

    /// A manager's role changed. If it is the in-flight record's old primary
    /// and both participants are still `SecondaryTransient`, the demotion
    /// requested at handover start has taken effect: promote the new primary
    /// and finish. Any failed check aborts the attempt.
    ///
    /// Correlation is by identity plus expected role, never by trusting the
    /// earlier request's completion: role requests are fire-and-forget and
    /// this event is their only confirmation.
    fn maybe_continue(&mut self, changed: ManagerId) {
        // not in the middle of a handover
        let Some(info) = self.in_flight.take() else {
            return;
        };
        // not the manager we are waiting on, keep monitoring
        if changed != info.old_primary {
            self.in_flight = Some(info);
            return;
        }
        // From here the attempt resolves one way or the other; the record
        // stays cleared.
        if self.fleet.role_of(info.old_primary) != Some(ConnectionRole::SecondaryTransient) {
            info!(
                old_primary = %info.old_primary,
                "Old primary is no longer secondary-transient, aborting handover"
            );
            return;
        }
        if self.fleet.role_of(info.new_primary) != Some(ConnectionRole::SecondaryTransient) {
            info!(
                new_primary = %info.new_primary,
                "New primary is no longer secondary-transient, aborting handover"
            );
            return;
        }

        info!(
            old_primary = %info.old_primary,
            new_primary = %info.new_primary,
            "Continuing handover: promoting new primary and deprioritizing old"
        );
        self.fleet.request_role_change(
            info.new_primary,
            ConnectionRole::Primary,
            RoleChangeRequestor::System,
        );
        // Let the old primary linger as a scored-down fallback while it
        // winds down.
        self.fleet.mark_deprioritized(info.old_primary);
        self.send_signal(HandoverSignal::ReservationReleased);
    }

    /// A manager left the fleet. A participant disappearing mid-handover
    /// invalidates the whole attempt; recovery then runs because the removal
    /// may have left the fleet without a primary.
    fn on_manager_removed(&mut self, removed: ManagerId) {
        if let Some(info) = &self.in_flight {
            if info.involves(removed) {
                info!(
                    %removed,
                    old_primary = %info.old_primary,
                    new_primary = %info.new_primary,
                    "Handover participant removed, aborting"
                );
                self.in_flight = None;
            }
        }
        self.recover_primary();
    }

    fn send_signal(&self, signal: HandoverSignal) {
        if self.signals.send(signal).is_err() {
            warn!(?signal, "Signal receiver dropped, notification lost");
        }
    }
}

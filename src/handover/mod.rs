//! Make-before-break handover engine
//!
//! Holds the single in-flight [`TransitionRecord`] and the coordinator that
//! advances, aborts, or completes it:
//! - Recovery policy: never leave the fleet without a primary when one is
//!   recoverable
//! - Transition initiator: a validated secondary starts a handover
//! - Continuation/abort engine: the old primary's confirmed demotion drives
//!   the handover to completion; invalidating lifecycle events abort it

pub mod coordinator;
pub mod record;
pub mod signal;

pub use coordinator::HandoverCoordinator;
pub use record::TransitionRecord;
pub use signal::HandoverSignal;

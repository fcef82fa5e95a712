//! Traversal-cost engine.
//!
//! Two evaluation strategies over the same [`RoomGraph`], required to agree
//! wherever both terminate:
//!
//! | Strategy | Entry point | Complexity | Notes |
//! |----------|-------------|------------|-------|
//! | Direct simulation | [`TraversalEngine::simulate_within`] | \(O(\text{steps})\) | Exact oracle; caller-bounded |
//! | Memoized evaluation | [`TraversalEngine::evaluate`] | \(O(n)\) | Production path; round trips cached |
//!
//! The engine owns the graph exclusively for the duration of an evaluation:
//! both strategies flip the per-room portal toggles in place, and the
//! memoized strategy additionally writes each room's round-trip memo slot at
//! most once. Nothing here is safe to share across threads, and nothing needs
//! to be.

mod memo;
mod simulate;

use core::fmt;

use crate::graph::{RoomGraph, RoomId};

/// The prime modulus every cost accumulation is reduced by.
pub const COST_MODULUS: u64 = 1_000_000_007;

/// Error surfaced during traversal evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalError {
    /// A room's round trip was demanded again while its own computation was
    /// still open. The portal layout violates the round-trip precondition;
    /// surfacing this beats recursing forever.
    UnreturningRoundTrip {
        /// The room whose round trip cannot complete.
        room: RoomId,
    },
    /// Direct simulation exhausted the caller-imposed step budget before
    /// reaching the terminal room.
    StepLimitExceeded {
        /// The budget that was exhausted.
        limit: u64,
    },
}

impl fmt::Display for TraversalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnreturningRoundTrip { room } => {
                write!(f, "round trip of {room} cannot return to its origin")
            }
            Self::StepLimitExceeded { limit } => {
                write!(f, "simulation exceeded the step limit of {limit}")
            }
        }
    }
}

impl std::error::Error for TraversalError {}

/// The traversal-cost engine.
///
/// Wraps a [`RoomGraph`] and the modulus configuration. The graph is held
/// exclusively until [`TraversalEngine::into_graph`] releases it.
pub struct TraversalEngine {
    graph: RoomGraph,
    modulus: u64,
    computed_round_trips: u64,
}

impl TraversalEngine {
    /// Wraps a graph with the standard [`COST_MODULUS`].
    pub fn new(graph: RoomGraph) -> Self {
        Self::with_modulus(graph, COST_MODULUS)
    }

    /// Wraps a graph with an explicit modulus.
    ///
    /// The modulus is configuration, not hidden global state; tests use small
    /// values here to exercise wraparound without astronomical walks.
    pub fn with_modulus(graph: RoomGraph, modulus: u64) -> Self {
        debug_assert!(modulus > 1, "modulus must leave room for a nonzero cost");
        Self {
            graph,
            modulus,
            computed_round_trips: 0,
        }
    }

    /// Number of round trips computed so far (memo misses).
    ///
    /// At most one per portal room over any number of evaluations; tests use
    /// this to verify memoization directly rather than by timing.
    pub fn round_trip_computations(&self) -> u64 {
        self.computed_round_trips
    }

    /// The modulus this engine reduces by.
    pub fn modulus(&self) -> u64 {
        self.modulus
    }

    /// Releases the graph, ending the engine's exclusive ownership.
    pub fn into_graph(self) -> RoomGraph {
        self.graph
    }
}

/// Adds `incr` to `total`, reduced by `modulus`.
///
/// Both operands are already reduced, so the sum stays far below `u64::MAX`.
#[inline(always)]
pub(crate) fn mod_add(total: u64, incr: u64, modulus: u64) -> u64 {
    (total + incr) % modulus
}

//! Memoized round-trip evaluation, the linear-time production strategy.
//!
//! The walk from the start room to the terminal nets out to one trip along
//! the retreat chain: every room between them is departed chainward exactly
//! once at the top level. A chainward departure from room `v` costs either
//! `1` (the retreat portal was already the active one) or `round_trip(v) + 1`
//! (the advance portal fires first, the walk wanders back to `v`, and only
//! then crosses the retreat portal). `round_trip(v)` is a pure function of
//! the portal wiring, so it is cached in the room's memo slot the first time
//! it is demanded and never recomputed.
//!
//! Two departures from the precondition are handled explicitly:
//!
//! - A round trip that reaches the terminal room before returning ends the
//!   entire traversal; the accumulated cost is the final answer and the
//!   abandoned round trip leaves no cache entry.
//! - A round trip demanded while its own computation is still open cannot be
//!   represented by the cache and is reported as
//!   [`TraversalError::UnreturningRoundTrip`]. The `InProgress` markers also
//!   bound the recursion depth by the room count.

use crate::graph::{RoomId, RoundTrip};

use super::{mod_add, TraversalEngine, TraversalError};

/// Outcome of one chainward departure.
enum Departure {
    /// The walk crossed to the adjacent room at this cost.
    Chain(u64),
    /// The walk reached the terminal room; the traversal is over.
    Terminal(u64),
}

/// Outcome of one round-trip excursion.
enum Excursion {
    /// The excursion returned to its origin at this cost.
    Completed(u64),
    /// The excursion reached the terminal room; the traversal is over.
    Escaped(u64),
}

impl TraversalEngine {
    /// Computes the total traversal cost from the start room to the terminal
    /// room, modulo the configured modulus.
    ///
    /// Runs in time linear in the room count, caching each room's round-trip
    /// cost on first demand. A graph with no portal rooms costs `0`.
    /// Re-evaluating a fully cached graph returns the same scalar without
    /// recomputing or rewriting any memo slot.
    ///
    /// # Errors
    /// [`TraversalError::UnreturningRoundTrip`] when the portal layout makes
    /// a round trip demand itself before completing.
    pub fn evaluate(&mut self) -> Result<u64, TraversalError> {
        let mut total = 0u64;
        // Ids along the retreat chain are consecutive, so the top-level walk
        // is a plain scan in increasing id order.
        for id in 1..self.graph.terminal().get() {
            match self.depart_chainward(RoomId::new(id))? {
                Departure::Chain(cost) => total = mod_add(total, cost, self.modulus),
                Departure::Terminal(cost) => return Ok(mod_add(total, cost, self.modulus)),
            }
        }
        Ok(total)
    }

    /// Departs `id` and nets out one step along the retreat chain.
    ///
    /// Each physical departure flips the room's toggle exactly once: the
    /// cheap branch is a single retreat crossing, the expensive branch is an
    /// advance crossing, a full round trip back, and then the retreat
    /// crossing.
    fn depart_chainward(&mut self, id: RoomId) -> Result<Departure, TraversalError> {
        let room = self.graph.room_mut(id);
        if room.next_edge_is_retreat {
            room.next_edge_is_retreat = false;
            return Ok(Departure::Chain(1));
        }

        // Advance portal fires first; the toggle must read as flipped while
        // the excursion is open, because the walk may re-enter this room.
        room.next_edge_is_retreat = true;
        match self.round_trip(id)? {
            Excursion::Completed(cost) => {
                self.graph.room_mut(id).next_edge_is_retreat = false;
                Ok(Departure::Chain(mod_add(cost, 1, self.modulus)))
            }
            Excursion::Escaped(cost) => Ok(Departure::Terminal(cost)),
        }
    }

    /// Cost of leaving `origin` through its advance portal and walking
    /// chainward until a room with the same id is reached again.
    ///
    /// Memoized: computed at most once per room; later demands return the
    /// cached value without recursing.
    fn round_trip(&mut self, origin: RoomId) -> Result<Excursion, TraversalError> {
        match self.graph.room(origin).round_trip {
            RoundTrip::Done(cost) => return Ok(Excursion::Completed(cost)),
            RoundTrip::InProgress => {
                return Err(TraversalError::UnreturningRoundTrip { room: origin })
            }
            RoundTrip::Unset => {}
        }
        self.graph.room_mut(origin).round_trip = RoundTrip::InProgress;

        let terminal = self.graph.terminal();
        // The advance crossing out of `origin`.
        let mut cost = 1u64;
        let mut current = self
            .graph
            .room(origin)
            .advance
            .expect("round trip demanded on the terminal room");

        while current != origin {
            if current == terminal {
                return Ok(self.abandon_round_trip(origin, cost));
            }
            match self.depart_chainward(current)? {
                Departure::Chain(step) => {
                    cost = mod_add(cost, step, self.modulus);
                    current = self
                        .graph
                        .room(current)
                        .retreat
                        .expect("non-terminal room missing its retreat portal");
                }
                Departure::Terminal(step) => {
                    let cost = mod_add(cost, step, self.modulus);
                    return Ok(self.abandon_round_trip(origin, cost));
                }
            }
        }

        self.graph.room_mut(origin).round_trip = RoundTrip::Done(cost);
        self.computed_round_trips += 1;
        #[cfg(feature = "tracing")]
        tracing::trace!(origin = origin.get(), cost, "round trip memoized");
        Ok(Excursion::Completed(cost))
    }

    /// Clears the open marker of a round trip that escaped to the terminal.
    ///
    /// The walk is over, so no cache entry is written: the slot reverts to
    /// `Unset` rather than recording a value that never closed the loop.
    fn abandon_round_trip(&mut self, origin: RoomId, cost: u64) -> Excursion {
        self.graph.room_mut(origin).round_trip = RoundTrip::Unset;
        #[cfg(feature = "tracing")]
        tracing::trace!(origin = origin.get(), cost, "round trip escaped to terminal");
        Excursion::Escaped(cost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::RoomGraph;

    fn evaluate(portal_rooms: usize, targets: &[usize]) -> Result<u64, TraversalError> {
        let graph = RoomGraph::build(portal_rooms, targets).unwrap();
        TraversalEngine::new(graph).evaluate()
    }

    #[test]
    fn test_empty_graph_costs_nothing() {
        assert_eq!(evaluate(0, &[]).unwrap(), 0);
    }

    #[test]
    fn test_single_room_straight_to_terminal() {
        // Advance portal of room 1 lands on the terminal: one crossing.
        assert_eq!(evaluate(1, &[2]).unwrap(), 1);
    }

    #[test]
    fn test_single_room_self_loop() {
        // Advance back into room 1, then retreat out: two crossings.
        assert_eq!(evaluate(1, &[1]).unwrap(), 2);
    }

    #[test]
    fn test_escape_skips_unreached_rooms() {
        // Room 1 jumps straight to the terminal; room 2's round trip is
        // never charged.
        assert_eq!(evaluate(2, &[3, 1]).unwrap(), 1);
    }

    #[test]
    fn test_hand_simulated_backward_loops() {
        // 1 -> 1 -> 2 -> 1 -> 1 -> 2 -> 3: six crossings.
        assert_eq!(evaluate(2, &[1, 1]).unwrap(), 6);
    }

    #[test]
    fn test_hand_simulated_forward_then_back() {
        // 1 -> 2 -> 1 -> 2 -> 3: four crossings. Room 1 is re-entered while
        // its own excursion is open and departs via the cheap retreat branch.
        assert_eq!(evaluate(2, &[2, 1]).unwrap(), 4);
    }

    #[test]
    fn test_unreturning_round_trip_is_fatal() {
        // Room 2's excursion re-demands room 1's round trip while room 1's
        // own excursion is still open.
        let err = evaluate(3, &[3, 1, 1]).unwrap_err();
        assert_eq!(
            err,
            TraversalError::UnreturningRoundTrip {
                room: crate::graph::RoomId::new(1)
            }
        );
    }

    #[test]
    fn test_round_trips_computed_at_most_once() {
        // Every advance portal loops back to room 1, so every round trip
        // demands all the earlier ones.
        let graph = RoomGraph::build(5, &[1, 1, 1, 1, 1]).unwrap();
        let mut engine = TraversalEngine::new(graph);

        let first = engine.evaluate().unwrap();
        assert_eq!(engine.round_trip_computations(), 5);

        // Fully cached: same scalar, no new computations.
        let second = engine.evaluate().unwrap();
        assert_eq!(first, second);
        assert_eq!(engine.round_trip_computations(), 5);
    }

    #[test]
    fn test_escape_leaves_no_cache_entry() {
        let graph = RoomGraph::build(2, &[3, 1]).unwrap();
        let mut engine = TraversalEngine::new(graph);
        assert_eq!(engine.evaluate().unwrap(), 1);
        assert_eq!(engine.round_trip_computations(), 0);
    }

    #[test]
    fn test_small_modulus_wraps() {
        // Doubling layout: total is 2^(n+1) - 2 before reduction.
        let graph = RoomGraph::build(4, &[1, 1, 1, 1]).unwrap();
        let mut engine = TraversalEngine::with_modulus(graph, 7);
        // 2 + 4 + 8 + 16 = 30; 30 mod 7 = 2.
        assert_eq!(engine.evaluate().unwrap(), 2);
    }

    #[test]
    fn test_result_stays_below_modulus() {
        // Doubling layout large enough to wrap the real modulus many times.
        let n = 64;
        let targets = vec![1usize; n];
        let total = evaluate(n, &targets).unwrap();
        assert!(total < crate::engine::COST_MODULUS);

        // Independent closed form: sum of d_i where d_i = 2^i, all mod p.
        let p = crate::engine::COST_MODULUS;
        let mut expected = 0u64;
        let mut d = 2u64;
        for _ in 0..n {
            expected = (expected + d) % p;
            d = (d * 2) % p;
        }
        assert_eq!(total, expected);
    }
}

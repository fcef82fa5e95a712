//! Direct step-by-step simulation, the exact but caller-bounded oracle.
//!
//! One state per room, one transition per portal crossing. Adversarial
//! layouts need an exponential number of transitions before reaching the
//! terminal, so the caller always supplies a step budget; there is no
//! unbounded entry point.

use super::{mod_add, TraversalEngine, TraversalError};

impl TraversalEngine {
    /// Replays the walk one portal crossing at a time until the terminal
    /// room, accumulating cost modulo the configured modulus.
    ///
    /// `step_limit` bounds *raw* transitions, not the reduced cost; the
    /// reduced total can wrap many times within one budget.
    ///
    /// # Errors
    /// [`TraversalError::StepLimitExceeded`] when the budget runs out before
    /// the terminal room is reached.
    pub fn simulate_within(&mut self, step_limit: u64) -> Result<u64, TraversalError> {
        let terminal = self.graph.terminal();
        let mut current = self.graph.start();
        let mut total = 0u64;
        let mut steps = 0u64;

        while current != terminal {
            if steps == step_limit {
                return Err(TraversalError::StepLimitExceeded { limit: step_limit });
            }

            let room = self.graph.room_mut(current);
            let next = if room.next_edge_is_retreat {
                room.retreat
            } else {
                room.advance
            };
            room.next_edge_is_retreat = !room.next_edge_is_retreat;

            total = mod_add(total, 1, self.modulus);
            steps += 1;
            current = next.expect("portal room missing an outgoing portal");
        }

        Ok(total)
    }
}

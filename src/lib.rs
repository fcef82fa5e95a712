//! # `portalwalk` - Alternating Two-Portal Traversal Costs
//!
//! A traversal-cost engine for directed room graphs in which every room has
//! exactly two outgoing portals and deterministically alternates which one it
//! uses each time it is departed.
//!
//! ## The model
//!
//! A graph of `N + 1` rooms, identified by 1-based ids. Room `N + 1` is the
//! terminal room and has no exits. Every other room `k` has:
//!
//! - an **advance portal** to an arbitrary room, fixed at build time, and
//! - a **retreat portal** to the adjacent room `k + 1`, so the retreat
//!   portals form a single chain from the start room to the terminal.
//!
//! The first departure from a room uses the advance portal; the portals then
//! alternate on every subsequent departure. The walk begins in room 1 and
//! stops on reaching the terminal room. The engine reports the number of
//! portal crossings used, reduced modulo [`COST_MODULUS`] after every
//! accumulation.
//!
//! ## Two strategies
//!
//! Direct simulation ([`TraversalEngine::simulate_within`]) replays the walk
//! one crossing at a time. It is exact but can need an exponential number of
//! transitions on adversarial portal layouts, so the caller must bound it.
//!
//! Memoized evaluation ([`TraversalEngine::evaluate`]) caches each room's
//! round-trip cost (the cost of leaving through the advance portal and
//! wandering back) the first time it is needed, and composes the answer from
//! those in time linear in the room count.
//!
//! ## Example
//!
//! ```
//! use portalwalk::{RoomGraph, TraversalEngine};
//!
//! // Three rooms plus the terminal; every advance portal loops back to room 1.
//! let graph = RoomGraph::build(3, &[1, 1, 1]).unwrap();
//! let mut engine = TraversalEngine::new(graph);
//! assert_eq!(engine.evaluate().unwrap(), 14);
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod engine;
pub mod graph;

pub use engine::{TraversalEngine, TraversalError, COST_MODULUS};
pub use graph::{BuildError, Room, RoomGraph, RoomId};

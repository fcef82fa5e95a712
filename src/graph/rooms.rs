//! Room arena for the alternating two-portal traversal graph.
//!
//! Rooms live in a flat arena and refer to each other through stable 1-based
//! ids rather than references, so the engine can mutate per-room traversal
//! state (the portal toggle and the round-trip memo slot) without any
//! aliasing gymnastics.
//!
//! ### Construction contract
//! `RoomGraph::build(n, targets)` produces `n + 1` rooms:
//! - room `k`'s retreat portal is room `k + 1`, for `k` in `[1, n]`;
//! - room `k`'s advance portal is `targets[k - 1]`, for `k` in `[1, n]`;
//! - room `n + 1` is the terminal and has no portals.
//!
//! Malformed input is a construction error; a partially built graph is never
//! handed to the engine.

use core::fmt;

/// A strongly-typed 1-based room id.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomId(usize);

impl RoomId {
    #[inline(always)]
    pub(crate) fn new(id: usize) -> Self {
        debug_assert!(id >= 1, "room ids are 1-based");
        Self(id)
    }

    /// Returns the 1-based room id.
    #[inline(always)]
    pub fn get(self) -> usize {
        self.0
    }

    /// Returns the 0-based arena index.
    #[inline(always)]
    pub(crate) fn index(self) -> usize {
        self.0 - 1
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "room {}", self.0)
    }
}

/// Memo slot for a room's round-trip cost.
///
/// `InProgress` marks a round trip whose computation is still open; demanding
/// it again is the non-termination precondition violation, not a hang.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RoundTrip {
    Unset,
    InProgress,
    Done(u64),
}

/// A single room: two outgoing portals plus mutable traversal state.
#[derive(Debug, Clone)]
pub struct Room {
    pub(crate) advance: Option<RoomId>,
    pub(crate) retreat: Option<RoomId>,
    pub(crate) next_edge_is_retreat: bool,
    pub(crate) round_trip: RoundTrip,
}

impl Room {
    fn portal(advance: RoomId, retreat: RoomId) -> Self {
        Self {
            advance: Some(advance),
            retreat: Some(retreat),
            next_edge_is_retreat: false,
            round_trip: RoundTrip::Unset,
        }
    }

    fn terminal() -> Self {
        Self {
            advance: None,
            retreat: None,
            next_edge_is_retreat: false,
            round_trip: RoundTrip::Unset,
        }
    }

    /// Destination of the advance portal; `None` only for the terminal room.
    pub fn advance_target(&self) -> Option<RoomId> {
        self.advance
    }

    /// Destination of the retreat portal; `None` only for the terminal room.
    pub fn retreat_target(&self) -> Option<RoomId> {
        self.retreat
    }

    /// `true` when the next departure from this room uses the retreat portal.
    pub fn next_edge_is_retreat(&self) -> bool {
        self.next_edge_is_retreat
    }
}

/// Error returned by [`RoomGraph::build`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildError {
    /// The advance-target list length does not match the room count.
    TargetCountMismatch {
        /// Number of portal rooms the graph was asked for.
        expected: usize,
        /// Number of advance targets actually supplied.
        got: usize,
    },
    /// An advance target names a room outside `[1, n + 1]`.
    TargetOutOfRange {
        /// 1-based id of the room whose target is invalid.
        room: usize,
        /// The offending target value.
        target: usize,
        /// Highest valid room id (`n + 1`).
        max: usize,
    },
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TargetCountMismatch { expected, got } => {
                write!(f, "expected {expected} advance targets, got {got}")
            }
            Self::TargetOutOfRange { room, target, max } => {
                write!(
                    f,
                    "advance target {target} of room {room} outside valid range 1..={max}"
                )
            }
        }
    }
}

impl std::error::Error for BuildError {}

/// The room arena: `n` portal rooms plus one terminal room.
///
/// All rooms are created once at build time; the engine mutates only the
/// per-room toggle and memo slot afterwards, never the portal wiring.
#[derive(Debug, Clone)]
pub struct RoomGraph {
    rooms: Vec<Room>,
}

impl RoomGraph {
    /// Builds the arena for `portal_rooms` rooms plus the terminal.
    ///
    /// `advance_targets[i]` is the 1-based destination of room `i + 1`'s
    /// advance portal. Targets may point forward, backward, or at the room
    /// itself, but never outside `[1, portal_rooms + 1]`.
    ///
    /// # Errors
    /// Rejects a target list of the wrong length and any target of `0` or
    /// greater than `portal_rooms + 1`. Out-of-range targets are never
    /// clamped.
    pub fn build(portal_rooms: usize, advance_targets: &[usize]) -> Result<Self, BuildError> {
        if advance_targets.len() != portal_rooms {
            return Err(BuildError::TargetCountMismatch {
                expected: portal_rooms,
                got: advance_targets.len(),
            });
        }

        let max = portal_rooms + 1;
        let mut rooms = Vec::with_capacity(max);
        for (i, &target) in advance_targets.iter().enumerate() {
            let room = i + 1;
            if target == 0 || target > max {
                return Err(BuildError::TargetOutOfRange { room, target, max });
            }
            // Retreat portals chain each room to the adjacent one.
            rooms.push(Room::portal(RoomId::new(target), RoomId::new(room + 1)));
        }
        rooms.push(Room::terminal());

        Ok(Self { rooms })
    }

    /// Total number of rooms, including the terminal.
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Number of rooms with portals (excludes the terminal).
    pub fn portal_room_count(&self) -> usize {
        self.rooms.len() - 1
    }

    /// The start room, id 1.
    ///
    /// When the graph has no portal rooms, the start room *is* the terminal.
    pub fn start(&self) -> RoomId {
        RoomId::new(1)
    }

    /// The terminal room, highest id.
    pub fn terminal(&self) -> RoomId {
        RoomId::new(self.rooms.len())
    }

    /// Shared access to a room.
    ///
    /// # Panics
    /// Panics if `id` is out of bounds for this arena.
    #[inline(always)]
    pub fn room(&self, id: RoomId) -> &Room {
        &self.rooms[id.index()]
    }

    #[inline(always)]
    pub(crate) fn room_mut(&mut self, id: RoomId) -> &mut Room {
        &mut self.rooms[id.index()]
    }
}

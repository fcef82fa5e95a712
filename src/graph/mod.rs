//! Room arena and graph construction.

mod rooms;

pub use rooms::{BuildError, Room, RoomGraph, RoomId};

pub(crate) use rooms::RoundTrip;

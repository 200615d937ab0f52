//! Simulation core for a top-down arcade shooter.
//!
//! The library is a frame-stepped, single-threaded simulation: the host
//! (a terminal front-end here, but anything with a clock and a keyboard)
//! calls [`session::Session::advance_frame`] once per frame with the current
//! millisecond timestamp and an input snapshot, and renders whatever state
//! comes back.  All randomness flows through an injected `rand::Rng`, so a
//! seeded generator replays a session exactly.

pub mod catalog;
pub mod enemy;
pub mod geometry;
pub mod session;
pub mod spawn;

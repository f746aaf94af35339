//! Minimal STOMP 1.2 client over WebSocket.
//!
//! Provides a typed frame codec and a thin connection wrapper
//! (connect / subscribe / send / disconnect) on top of
//! `tokio-tungstenite`. Higher-level concerns such as what to subscribe
//! to and how to interpret message bodies belong to the crates built on
//! this one.

pub mod client;
pub mod frame;

pub use client::{StompClient, StompConnection, StompError};
pub use frame::{Command, Frame, FrameError};

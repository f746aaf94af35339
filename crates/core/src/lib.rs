//! Shared building blocks for the UMS web companion.
//!
//! This crate holds everything the network-facing crates have in common:
//!
//! - [`validation`] -- field validators and the live password checklist.
//! - [`forms`] -- whole-form validation for the registration form.
//! - [`view`] -- in-memory view models for the notification table and
//!   select controls, with escaped HTML rendering.
//! - [`topics`] -- STOMP destinations and REST paths shared with the server.

pub mod forms;
pub mod topics;
pub mod types;
pub mod validation;
pub mod view;

//! Typed controller operations
//!
//! Each operation builds its request, runs it through [`Uhppote::exec`] (or
//! [`Uhppote::broadcast`] for discovery), checks the fields the reply must
//! carry, and projects the reply into a domain record.
//!
//! [`Uhppote::exec`]: crate::network::Uhppote::exec
//! [`Uhppote::broadcast`]: crate::network::Uhppote::broadcast

mod cards;
mod devices;
mod doors;
mod events;
mod listener;
mod time;

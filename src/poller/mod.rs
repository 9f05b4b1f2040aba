//! Polling loop and render hand-off
//!
//! A [`Poller`] runs on its own thread, ticking at the refresh interval. Each
//! tick's [`RadarFrame`](crate::game::RadarFrame) replaces the previous one
//! in a `watch` channel; consumers hold a [`RadarHandle`].

pub mod shutdown;
pub mod state;
pub mod worker;

pub use shutdown::{ShutdownSignal, Wake};
pub use state::PollState;
pub use worker::{spawn, Poller, RadarHandle};

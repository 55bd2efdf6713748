//! Background Tasks Module
//!
//! Contains tasks spawned in response to page lifecycle events.
//!
//! # Tasks
//! - Deferred teardown: destroys the comment widget when a route change
//!   lands on a page without the widget anchor

mod teardown;

pub use teardown::spawn_deferred_teardown;

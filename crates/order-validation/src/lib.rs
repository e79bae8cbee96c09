//! Stateless checks run on every order before it may reach the order book.
//!
//! [`pipeline`] decides whether a derivative order is acceptable against a
//! market snapshot, [`margin`] holds the arithmetic it is built on and
//! [`messages`] the basic checks of the transaction messages carrying orders
//! and market registrations.

pub mod margin;
pub mod messages;
pub mod pipeline;

pub use pipeline::{AcceptedOrder, ValidatedOrder, validate, validate_derivative_order};

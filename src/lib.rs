//! Outcome Engine — weighted-random outcome generation for appliances.
//!
//! Turns a declarative JSON template document into concrete outcome
//! records at the press of a button: one weighted pick among outcome
//! definitions, one weighted sample per dynamic variable, and prompt
//! templates rendered against the result, ready to hand to external
//! generation services.

pub mod core;
pub mod schema;

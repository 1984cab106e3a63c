//! Typed data-access operations over the three entities.
//!
//! All validation happens here against the statically typed request structs,
//! so the rules hold no matter which transport invokes them. Operations with
//! multi-row effects (customer + initial log, log + parent timestamp bump)
//! run in a single transaction.

pub mod communication;
pub mod customer;
pub mod file;
pub mod statistics;

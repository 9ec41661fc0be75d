//! Shared test helpers for `calembed-core` integration tests.
//!
//! These helpers provide in-memory implementations of every core port plus a
//! few event fixtures so pipeline tests can focus on behaviour instead of
//! boilerplate.

#![allow(dead_code)]

pub mod calendar;
pub mod fixtures;
pub mod stores;

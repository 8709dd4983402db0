//! End-to-end tests at the HTTP request/response level.
//!
//! Each test file covers a specific scenario, driving the full router with
//! deterministic inputs and a manually advanced clock.

#![cfg(test)]

mod helpers;

mod test_gatekeeping;

// Life of a request:
// 1. POST /login checks the credentials against the configured principal
//    and answers with a signed, time-bounded token.
// 2. Protected routes pass through the bearer middleware, which validates
//    the token's structure, signature and expiry without any I/O.
// 3. Handlers read and write posts through the `PostRepository` seam.
//
// System components:
//  - Token service (issuance + validation)
//  - Credential verifier
//  - Gatekeeping middleware
//  - Post store

pub mod api;
pub mod auth;
pub mod config;
pub mod posts;
pub mod state;

#[cfg(test)]
mod e2e_tests;
#[cfg(test)]
mod testing;

pub use api::router;
pub use state::AppState;

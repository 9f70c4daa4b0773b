//! # Intake (Registration Form Handler)
//!
//! `intake` is a small HTTP service that accepts user-registration form
//! submissions, validates them server-side, hashes the password with
//! **Argon2id**, and appends one row per registration to an append-only CSV
//! store.
//!
//! ## Store
//!
//! The store is a header-prefixed flat file shared between whatever serves
//! the registrations for inspection and this service. Writes happen under an
//! exclusive advisory file lock scoped to the single append, so concurrent
//! submitters cannot interleave partial rows. Rows are never rewritten or
//! removed.
//!
//! ## Request lifecycle
//!
//! Everything is bounded by one request/response cycle: non-POST requests
//! are redirected back to the static form, validation failures render an
//! error page without touching the store, and a valid submission appends
//! exactly one record and renders a confirmation page.

pub mod cli;
pub mod intake;
pub mod store;

#![cfg_attr(not(test), forbid(unsafe_code))]
//! Wire models shared by every page of the Onyx web client.
//!
//! Nothing in this crate performs I/O; it only defines the serde shapes the
//! backend speaks so the HTTP boundary decodes each payload exactly once.

pub mod models;

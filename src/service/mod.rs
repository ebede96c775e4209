//! Interface to the external poem-generation collaborator.
//!
//! Only the request/response contract and provider fallback live here; transports are
//! supplied by callers as [`generator::PoemGenerator`] implementations.

pub mod generator;
pub mod options;
pub mod prompt;
pub mod response;

//! Generation-service clients.
//!
//! The processor talks to the hosted model through the [`traits::GenerationClient`]
//! trait; [`gemini`] provides the production implementation.

#![warn(missing_docs, clippy::pedantic)]

pub mod gemini;
pub mod traits;

mod http_client;

//! Batch text translation proxy backed by Google's Gemini API.
//!
//! The service exposes a single `POST /api/translate` endpoint that forwards
//! a batch of text segments and a target language to Gemini with a
//! schema-constrained prompt, then returns the translated segments as JSON.

pub mod config;
pub mod error;
pub mod gemini;
pub mod server;
pub mod translation;

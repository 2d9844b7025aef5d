pub mod api;
mod client;
mod client_utils;
mod errors;
pub mod testing;
mod types;

pub use client::{GeminiClient, GeminiClientOptions, Generator};
pub use errors::{GenerationError, GenerationResult};
pub use types::*;

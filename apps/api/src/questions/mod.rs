// Interview question generation.
// Implements: resume extraction, prompt composition, reply parsing, rendering.
// All LLM calls go through llm_client; no direct Gemini calls here.

pub mod extract;
pub mod generator;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod render;

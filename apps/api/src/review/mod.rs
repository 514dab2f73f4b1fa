// Resume review pipeline: upload → extract → LLM review → parse → render PDF → persist.
// All LLM calls go through llm_client — no direct Anthropic calls here.

pub mod extractor;
pub mod feedback;
pub mod handlers;
pub mod parser;
pub mod prompts;
pub mod renderer;
pub mod service;
pub mod store;
pub mod uploads;

#[cfg(test)]
pub mod testing;

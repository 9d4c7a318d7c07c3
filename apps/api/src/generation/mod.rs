// Resume generation: request form, prompt assembly, the LLM call, and the HTTP
// handlers that chain generation → parse → render.
// All LLM calls go through the TextGenerator trait; no direct API calls here.

pub mod form;
pub mod generator;
pub mod handlers;
pub mod prompts;

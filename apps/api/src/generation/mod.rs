// Article generation: requirements in, one LLM call, graded article out.
// All LLM calls go through llm_client's TextGenerator; no direct Anthropic calls here.

pub mod generator;
pub mod handlers;
pub mod prompts;

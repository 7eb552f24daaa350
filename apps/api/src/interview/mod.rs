// Interview engine: opening question → classify answer → strong/weak follow-up.
// All LLM calls go through llm_client — no direct Gemini calls here.

pub mod classifier;
pub mod conversation;
pub mod handlers;
pub mod prompts;
pub mod router;
pub mod sessions;
pub mod tracks;

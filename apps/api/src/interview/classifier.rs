//! Classifier step — asks the model for a one-word verdict on an answer.
//!
//! The verdict is read with a substring policy, not a strict parser:
//! anything that does not mention "fuerte" is treated as weak.

use serde::Serialize;
use tracing::info;

use crate::interview::prompts::{classifier_prompt, STRONG_KEYWORD};
use crate::llm_client::{LlmError, TextGenerator};

/// Verdict on a single answer. Lives only for one routing decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Label {
    Strong,
    Weak,
}

/// Maps raw classifier output onto a label.
///
/// Case-insensitive substring match on the strong keyword. Empty, malformed,
/// multi-word or "Débil" output all fall through to `Weak`.
pub fn parse_label(raw: &str) -> Label {
    if raw.trim().to_lowercase().contains(STRONG_KEYWORD) {
        Label::Strong
    } else {
        Label::Weak
    }
}

/// Runs the classifier prompt once. No retry on odd output.
pub async fn classify(
    llm: &dyn TextGenerator,
    credential: &str,
    question: &str,
    answer: &str,
) -> Result<Label, LlmError> {
    let raw = llm
        .generate(credential, &classifier_prompt(question, answer))
        .await?;
    let label = parse_label(&raw);
    info!(raw = raw.trim(), ?label, "Answer classified");
    Ok(label)
}

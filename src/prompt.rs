//! Prompt assembly for the summarization request.

use itertools::Itertools;

/// Instruction prepended to every summarization prompt. It warns the
/// model that some articles may have degraded to placeholder text and
/// asks for the report regardless.
pub const SUMMARY_INSTRUCTION: &str = "You are a news editor. Write a single coherent, \
neutral news report summarizing the articles below. Reply with the report text only, \
without any preamble or sign-off. Some articles may be unavailable or truncated; attempt \
the report anyway using whatever content is present.";

/// Builds the full prompt: the instruction, then every article text in
/// aggregate order, separated by blank lines. With no articles at all
/// the prompt is just the instruction.
pub fn build_summary_prompt(texts: &[String]) -> String {
    if texts.is_empty() {
        return SUMMARY_INSTRUCTION.to_string();
    }
    format!("{SUMMARY_INSTRUCTION}\n\n{}", texts.iter().join("\n\n"))
}

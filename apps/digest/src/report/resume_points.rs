//! Prompt Builder — serializes label groups into the resume prompt and wraps
//! the generation response for persistence.
//!
//! Only completed checklist items reach the prompt; unfinished work is left out.

use tracing::debug;

use crate::llm_client::{GenerationError, TextGenerator};
use crate::report::label_groups::LabelGroups;
use crate::report::prompts::{
    RESUME_POINTS_HEADER, RESUME_PROMPT_TEMPLATE, RESUME_TASK_INSTRUCTION,
};
use crate::snapshot::models::CardRecord;

/// Builds the full prompt: the fixed task instruction followed by one
/// section per label in first-seen order.
pub fn build_resume_prompt(groups: &LabelGroups<'_>) -> String {
    let label_sections = groups
        .iter()
        .map(|group| render_label_section(group.label, &group.cards))
        .collect::<Vec<_>>()
        .join("\n");

    RESUME_PROMPT_TEMPLATE
        .replace("{task_instruction}", RESUME_TASK_INSTRUCTION)
        .replace("{label_sections}", &label_sections)
}

fn render_label_section(label: &str, cards: &[&CardRecord]) -> String {
    let mut section = format!("## {label}\n");
    for card in cards {
        section.push_str(&format!("- Card: {}\n", card.name));
        if let Some(description) = &card.description {
            let mut lines = description.lines();
            if let Some(first) = lines.next() {
                section.push_str(&format!("  Description: {first}\n"));
            }
            for line in lines {
                section.push_str(&format!("    {line}\n"));
            }
        }
        let completed: Vec<&str> = card.completed_items().collect();
        if !completed.is_empty() {
            section.push_str("  Completed items:\n");
            for item in completed {
                section.push_str(&format!("    - {item}\n"));
            }
        }
    }
    section
}

/// Sends the prompt to the generator once. No retry.
pub async fn generate_resume_points(
    generator: &dyn TextGenerator,
    prompt: &str,
) -> Result<String, GenerationError> {
    debug!("Requesting resume points ({} prompt chars)", prompt.len());
    generator.generate(prompt).await
}

/// The persisted report: fixed header, then the response verbatim.
pub fn render_resume_points(response: &str) -> String {
    format!("{RESUME_POINTS_HEADER}\n{response}")
}

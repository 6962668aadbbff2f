// Prompt constants for resume-point generation.
// The system prompt lives in llm_client::prompts alongside the client.

/// Fixed task instruction placed at the top of every resume prompt.
pub const RESUME_TASK_INSTRUCTION: &str = "\
    Using the completed work below, produce professional, quantified bullet points \
    grouped by category. Use one category per label heading. \
    Start each bullet with a strong action verb and quantify impact wherever the work supports it. \
    Do NOT invent work that is not listed.";

/// Resume prompt template.
/// Replace: {task_instruction}, {label_sections}
pub const RESUME_PROMPT_TEMPLATE: &str = r#"{task_instruction}

COMPLETED WORK, GROUPED BY LABEL:

{label_sections}"#;

/// Header written above the verbatim generation response.
pub const RESUME_POINTS_HEADER: &str = "RESUME POINTS\n=============\n";

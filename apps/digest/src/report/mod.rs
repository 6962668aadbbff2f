// Report outputs: the card list, label grouping, and the resume-points prompt.
// All LLM calls go through llm_client; nothing here talks to the API directly.

pub mod card_list;
pub mod label_groups;
pub mod prompts;
pub mod resume_points;

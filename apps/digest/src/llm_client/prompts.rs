// Cross-cutting prompt fragments for the LLM client.
// Task-specific prompt templates live next to the code that fills them.

/// System prompt for resume-point generation.
pub const RESUME_WRITER_SYSTEM: &str = "You are a professional resume writer who creates \
    impactful bullet points that highlight technical achievements and skills. \
    Write in a concise, results-oriented style. \
    Do NOT invent facts that are not present in the work you are given.";

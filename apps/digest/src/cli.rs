//! Command-line surface.

use std::path::PathBuf;

use clap::Parser;

/// digest - turn a board export into a card report and resume points
#[derive(Parser, Debug)]
#[command(
    name = "digest",
    version,
    about = "Summarize a member's cards from a board export",
    long_about = "Reads a board export (raw JSON or the browser's <pre>-wrapped JSON view),\n\
                  writes a numbered report of the member's cards, and asks the LLM for\n\
                  resume-style bullet points built from their completed checklist items."
)]
pub struct Cli {
    /// Path to the exported board snapshot
    pub snapshot: PathBuf,

    /// Board username whose cards are reported
    #[arg(short, long, env = "DIGEST_MEMBER")]
    pub member: String,

    /// Directory the reports are written to
    #[arg(short, long, env = "DIGEST_OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Write the card report only; never call the LLM
    #[arg(long)]
    pub skip_generation: bool,

    /// Also write the prompt sent to the LLM
    #[arg(long)]
    pub save_prompt: bool,
}

//! Run orchestration.
//!
//! Flow: read snapshot → decode → resolve member → join cards → write card
//!       list → group by label → build prompt → generate once → write resume points.
//!
//! Decode and I/O failures abort the run. A missing member or an empty card
//! set still produces a card list stating that nothing was found. A
//! generation failure is logged and recorded in the summary; the card list
//! already on disk is left alone.

use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use crate::errors::AppError;
use crate::llm_client::TextGenerator;
use crate::report::card_list::format_card_list;
use crate::report::label_groups::group_by_label;
use crate::report::resume_points::{
    build_resume_prompt, generate_resume_points, render_resume_points,
};
use crate::snapshot::decoder::decode_snapshot;
use crate::snapshot::joiner::join_cards;
use crate::snapshot::resolver::resolve_member_id;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub snapshot_path: PathBuf,
    pub username: String,
    pub output_dir: PathBuf,
    pub save_prompt: bool,
}

/// What happened to the resume-points step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// No cards, or no labeled cards: there was nothing to prompt with.
    NotAttempted,
    /// No generator was configured for this run.
    Skipped,
    Written(PathBuf),
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub member_id: Option<String>,
    pub card_count: usize,
    pub card_list_path: PathBuf,
    pub prompt_path: Option<PathBuf>,
    pub generation: GenerationOutcome,
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Runs one snapshot to completion. `generator` of `None` skips generation.
pub async fn run(
    options: &RunOptions,
    generator: Option<&dyn TextGenerator>,
) -> Result<RunSummary, AppError> {
    // Step 1: Read and decode
    let raw = tokio::fs::read_to_string(&options.snapshot_path)
        .await
        .map_err(|e| AppError::io(&options.snapshot_path, e))?;
    let snapshot = decode_snapshot(&raw)?;
    info!(
        "Loaded snapshot {}: {} cards, {} members",
        options.snapshot_path.display(),
        snapshot.cards.len(),
        snapshot.members.len()
    );

    // Step 2: Resolve member
    let member_id = resolve_member_id(&snapshot, &options.username);

    // Step 3: Join
    let records = match member_id {
        Some(id) => {
            info!("Resolved '{}' to member {}", options.username, id);
            join_cards(&snapshot, id)
        }
        None => {
            warn!(
                "No member named '{}' on this board; reporting zero cards",
                options.username
            );
            Vec::new()
        }
    };
    info!("Found {} cards for '{}'", records.len(), options.username);

    // Step 4: Card list (always written)
    tokio::fs::create_dir_all(&options.output_dir)
        .await
        .map_err(|e| AppError::io(&options.output_dir, e))?;

    let stem = file_stem(&options.username);
    let card_list_path = options.output_dir.join(format!("{stem}_cards.txt"));
    write_report(&card_list_path, &format_card_list(&records)).await?;

    let mut summary = RunSummary {
        member_id: member_id.map(str::to_string),
        card_count: records.len(),
        card_list_path,
        prompt_path: None,
        generation: GenerationOutcome::NotAttempted,
    };

    if records.is_empty() {
        return Ok(summary);
    }

    // Step 5: Group and build prompt
    let groups = group_by_label(&records);
    if groups.unlabeled > 0 {
        warn!(
            "{} of {} cards have no labels and are left out of the resume prompt",
            groups.unlabeled,
            records.len()
        );
    }
    if groups.is_empty() {
        warn!("No labeled cards; skipping resume-point generation");
        return Ok(summary);
    }

    let prompt = build_resume_prompt(&groups);
    info!("Built resume prompt from {} label groups", groups.len());
    if options.save_prompt {
        let prompt_path = options.output_dir.join(format!("{stem}_resume_prompt.txt"));
        write_report(&prompt_path, &prompt).await?;
        summary.prompt_path = Some(prompt_path);
    }

    // Step 6: Generate once and persist
    let Some(generator) = generator else {
        info!("No LLM configured; skipping resume-point generation");
        summary.generation = GenerationOutcome::Skipped;
        return Ok(summary);
    };

    summary.generation = match generate_resume_points(generator, &prompt).await {
        Ok(response) => {
            let path = options.output_dir.join(format!("{stem}_resume_points.txt"));
            write_report(&path, &render_resume_points(&response)).await?;
            GenerationOutcome::Written(path)
        }
        Err(e) => {
            error!("Resume-point generation failed: {e}");
            GenerationOutcome::Failed(e.to_string())
        }
    };

    Ok(summary)
}

async fn write_report(path: &Path, contents: &str) -> Result<(), AppError> {
    tokio::fs::write(path, contents)
        .await
        .map_err(|e| AppError::io(path, e))?;
    info!("Wrote {}", path.display());
    Ok(())
}

/// Usernames become file names; anything outside `[A-Za-z0-9_.-]` maps to `_`.
fn file_stem(username: &str) -> String {
    let stem: String = username
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if stem.is_empty() {
        "member".to_string()
    } else {
        stem
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

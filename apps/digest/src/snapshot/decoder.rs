//! Snapshot Decoder — turns exported text into a `Snapshot`.
//!
//! A board export is either raw JSON or JSON wrapped in a `<pre>` block by the
//! browser's JSON viewer. The wrapped form may carry attributes on the opening
//! tag and HTML-escaped payload text.

use std::borrow::Cow;

use tracing::debug;

use crate::errors::DecodeError;
use crate::snapshot::models::Snapshot;

const OPEN_MARKER: &str = "<pre";
const CLOSE_MARKER: &str = "</pre>";

/// Decodes raw or `<pre>`-wrapped snapshot text.
///
/// A wrapped payload is parsed as-is first; only when that fails is it
/// HTML-unescaped and parsed again. Missing `members`, `cards` or
/// `checklists` decode as empty collections.
pub fn decode_snapshot(raw: &str) -> Result<Snapshot, DecodeError> {
    let snapshot = match extract_wrapped_payload(raw) {
        Some(inner) => {
            debug!("Snapshot payload is wrapped in a <pre> block");
            decode_wrapped(inner)?
        }
        None => serde_json::from_str::<Snapshot>(raw)?,
    };

    debug!(
        "Decoded snapshot: {} members, {} cards, {} checklists",
        snapshot.members.len(),
        snapshot.cards.len(),
        snapshot.checklists.len()
    );

    Ok(snapshot)
}

/// On failure the error from the verbatim parse is reported.
fn decode_wrapped(inner: &str) -> Result<Snapshot, DecodeError> {
    let err = match serde_json::from_str::<Snapshot>(inner) {
        Ok(snapshot) => return Ok(snapshot),
        Err(e) => e,
    };

    match unescape_html(inner) {
        Cow::Owned(unescaped) => {
            debug!("Retrying wrapped payload with HTML entities decoded");
            serde_json::from_str(&unescaped).map_err(|_| DecodeError::MalformedJson(err))
        }
        Cow::Borrowed(_) => Err(DecodeError::MalformedJson(err)),
    }
}

/// Returns the text between the first opening `<pre ...>` tag and the first
/// `</pre>` after it. Text that already starts as a JSON object is never
/// treated as wrapped.
fn extract_wrapped_payload(raw: &str) -> Option<&str> {
    if raw.trim_start().starts_with('{') {
        return None;
    }

    let tag_start = raw.match_indices(OPEN_MARKER).find_map(|(idx, _)| {
        let rest = &raw[idx + OPEN_MARKER.len()..];
        // `<pre` must end the tag name: `<pre>` or `<pre style=...>`, not `<preview>`.
        match rest.chars().next() {
            Some('>') => Some(idx + OPEN_MARKER.len()),
            Some(c) if c.is_ascii_whitespace() => Some(idx + OPEN_MARKER.len()),
            _ => None,
        }
    })?;

    let after_name = &raw[tag_start..];
    let body_start = after_name.find('>')? + 1;
    let body = &after_name[body_start..];
    let body_end = body.find(CLOSE_MARKER)?;

    Some(&body[..body_end])
}

fn unescape_html(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }
    // `&amp;` last so `&amp;lt;` becomes the literal `&lt;`.
    Cow::Owned(
        text.replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'")
            .replace("&#x27;", "'")
            .replace("&amp;", "&"),
    )
}

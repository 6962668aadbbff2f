use crate::snapshot::models::Snapshot;

/// Maps a username to the board's internal member id.
///
/// Exact, case-sensitive match; the first matching member wins. `None` is an
/// ordinary outcome (wrong username, or the member left the board) and means
/// there are no cards to report.
pub fn resolve_member_id<'a>(snapshot: &'a Snapshot, username: &str) -> Option<&'a str> {
    snapshot
        .members
        .iter()
        .find(|member| member.username == username)
        .map(|member| member.id.as_str())
}

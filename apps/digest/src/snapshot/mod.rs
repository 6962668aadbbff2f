// Snapshot parsing: decode the export, resolve the member, join their cards.

pub mod decoder;
pub mod joiner;
pub mod models;
pub mod resolver;

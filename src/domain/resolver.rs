//! Resolution of bang expressions against a session's history
//!
//! Resolution is read-only. Prefix and substring lookups scan oldest-first
//! and return the first hit, so `!c` picks the earliest matching command.

use crate::domain::expansion::Expression;
use crate::domain::history::HistoryRecord;
use crate::error::{BangError, Result};

/// Resolve an expression to the command text it refers to
///
/// # Errors
///
/// - `NoHistory` if the session has no record
/// - `InvalidIndex` for index zero, an out-of-range index, or `!!` on an empty record
/// - `CommandNotFound` if no command matches a prefix or substring token
/// - `Config` if called with `Expression::NoExpansion` on an existing record
pub fn resolve(
    session_id: &str,
    record: Option<&HistoryRecord>,
    expression: &Expression,
) -> Result<String> {
    let Some(record) = record else {
        return Err(BangError::NoHistory {
            session_id: session_id.to_string(),
        });
    };
    let commands = &record.commands;

    let found = match expression {
        Expression::LastCommand => commands
            .last()
            .ok_or(BangError::InvalidIndex { index: 0 })?,
        Expression::IndexedCommand(index) => {
            let position =
                position_for(*index, commands.len()).ok_or(BangError::InvalidIndex { index: *index })?;
            &commands[position]
        }
        Expression::PrefixMatch(token) => commands
            .iter()
            .find(|c| c.starts_with(token.as_str()))
            .ok_or_else(|| BangError::CommandNotFound {
                pattern: token.clone(),
            })?,
        Expression::SubstringMatch(token) => commands
            .iter()
            .find(|c| c.contains(token.as_str()))
            .ok_or_else(|| BangError::CommandNotFound {
                pattern: format!("?{token}"),
            })?,
        Expression::NoExpansion => {
            return Err(BangError::Config(
                "cannot resolve a message that is not a bang expression".to_string(),
            ));
        }
    };

    Ok(found.clone())
}

/// Map a signed history index to a vector position
///
/// Positive indexes are 1-based from the oldest entry; negative ones count
/// back from the newest. Zero and anything outside `[0, len)` yield `None`.
#[must_use]
pub fn position_for(index: i64, len: usize) -> Option<usize> {
    let len = i64::try_from(len).ok()?;
    let position = match index {
        0 => return None,
        i if i > 0 => i - 1,
        i => len.checked_add(i)?,
    };

    if (0..len).contains(&position) {
        usize::try_from(position).ok()
    } else {
        None
    }
}

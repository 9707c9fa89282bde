// ABOUTME: Coercion of submitted settings and save-time errors
// ABOUTME: Turns a form submission into the ordered batch of option changes

use rstore_storage::{OptionChange, OptionValue, StorageError};
use thiserror::Error;

use crate::schema::{reseller_settings, NEXT_SYNC, PL_ID};
use crate::types::{FieldKind, SettingDefinition, Submission};

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("Error: Invalid Session. Refresh the page and try again.")]
    InvalidSession,

    #[error("Error: Invalid Private Label ID.")]
    InvalidPrivateLabelId,

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Coerce raw input to a non-negative integer.
///
/// Reads the leading integer after optional whitespace and sign, like the
/// host's integer cast. Missing, non-numeric and negative input all give 0;
/// values past `i64::MAX` saturate.
pub fn absint(raw: Option<&str>) -> u64 {
    let Some(raw) = raw else {
        return 0;
    };

    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let mut value: u64 = 0;
    for byte in digits.bytes().take_while(u8::is_ascii_digit) {
        value = value
            .saturating_mul(10)
            .saturating_add(u64::from(byte - b'0'))
            .min(i64::MAX as u64);
    }

    if negative {
        0
    } else {
        value
    }
}

/// The value to persist for `setting`, or `None` when the key should be deleted
pub fn coerce(setting: &SettingDefinition, raw: Option<&str>) -> Option<OptionValue> {
    let value = match setting.kind {
        FieldKind::Number => OptionValue::Int(absint(raw)),
        FieldKind::Text | FieldKind::Select { .. } | FieldKind::Checkbox => {
            OptionValue::Text(raw.unwrap_or_default().to_string())
        }
        FieldKind::Time => return None,
    };

    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Private label id carried by a submission, rejecting missing or zero ids
pub fn private_label_id(submission: &Submission) -> Result<u64, SaveError> {
    match absint(submission.get(PL_ID)) {
        0 => Err(SaveError::InvalidPrivateLabelId),
        id => Ok(id),
    }
}

/// Batch of changes a submission produces: one upsert or delete per submitted
/// setting in schema order, then the invalidation of `next_sync`.
pub fn plan_changes(submission: &Submission) -> Vec<OptionChange> {
    let mut changes: Vec<OptionChange> = reseller_settings()
        .iter()
        .filter(|setting| setting.kind.is_submitted())
        .map(|setting| match coerce(setting, submission.get(setting.name)) {
            Some(value) => OptionChange::set(setting.name, value),
            None => OptionChange::delete(setting.name),
        })
        .collect();

    // Forces the sync subsystem to recompute its next run
    changes.push(OptionChange::delete(NEXT_SYNC));
    changes
}

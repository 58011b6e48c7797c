//! Rules for folding partial server responses into the local user cache.

use serde_json::Value;
use shared::domain::{UserRecord, ID_FIELD};

/// Shapes a freshly created record like `template`.
///
/// Every template field takes the server's value when it is present and not
/// `null`, otherwise an empty string. Fields the server sent that the
/// template lacks are dropped. Without a template the server record is used
/// as-is.
pub fn conform_created(template: Option<&UserRecord>, created: UserRecord) -> UserRecord {
    let Some(template) = template else {
        return created;
    };

    let mut record = UserRecord::new();
    for field in template.field_names() {
        let value = created
            .present(field)
            .cloned()
            .unwrap_or_else(|| Value::String(String::new()));
        record.insert(field, value);
    }
    record
}

/// Merges an update response over the record it modified.
///
/// The existing record's field set is kept; each field takes the server's
/// value when present and not `null`, otherwise the existing value. The `id`
/// field is never taken from the response.
pub fn merge_updated(existing: &UserRecord, updated: &UserRecord) -> UserRecord {
    let mut record = UserRecord::new();
    for (field, current) in existing.fields() {
        let value = if field == ID_FIELD {
            current.clone()
        } else {
            updated.present(field).unwrap_or(current).clone()
        };
        record.insert(field, value);
    }
    record
}

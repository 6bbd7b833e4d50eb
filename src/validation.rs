//! Shape checks for raw manifest values.

use serde_json::Value;

/// Check that a raw `poems` value is an array of poem metadata records.
///
/// Each record must be an object with a non-empty string `filename`. `tags`
/// may be missing or null; if present it must be an array of strings.
pub fn validate_poem_metadata(poems: &Value) -> bool {
    let Some(entries) = poems.as_array() else {
        return false;
    };

    entries.iter().all(is_poem_meta)
}

fn is_poem_meta(entry: &Value) -> bool {
    let Some(record) = entry.as_object() else {
        return false;
    };

    let filename_ok = record
        .get("filename")
        .and_then(Value::as_str)
        .is_some_and(|name| !name.is_empty());

    let tags_ok = match record.get("tags") {
        None | Some(Value::Null) => true,
        Some(Value::Array(tags)) => tags.iter().all(Value::is_string),
        Some(_) => false,
    };

    filename_ok && tags_ok
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_accepts_well_formed_records() {
        assert!(validate_poem_metadata(&json!([])));
        assert!(validate_poem_metadata(&json!([
            { "filename": "a.md", "tags": ["x", "y"] },
            { "filename": "b.md", "tags": [] },
            { "filename": "c.md" },
            { "filename": "d.md", "tags": null, "extra": true }
        ])));
    }

    #[test]
    fn test_rejects_non_arrays() {
        assert!(!validate_poem_metadata(&json!("not-an-array")));
        assert!(!validate_poem_metadata(&json!(null)));
        assert!(!validate_poem_metadata(&json!({ "filename": "a.md" })));
    }

    #[test]
    fn test_rejects_bad_filenames() {
        assert!(!validate_poem_metadata(&json!([{ "tags": ["x"] }])));
        assert!(!validate_poem_metadata(&json!([{ "filename": "" }])));
        assert!(!validate_poem_metadata(&json!([{ "filename": 12 }])));
        assert!(!validate_poem_metadata(&json!(["a.md"])));
    }

    #[test]
    fn test_rejects_bad_tags() {
        assert!(!validate_poem_metadata(&json!([{ "filename": "a.md", "tags": "x" }])));
        assert!(!validate_poem_metadata(&json!([{ "filename": "a.md", "tags": ["x", 1] }])));
    }

    #[test]
    fn test_one_bad_record_fails_the_whole_list() {
        assert!(!validate_poem_metadata(&json!([
            { "filename": "a.md" },
            { "filename": null }
        ])));
    }
}

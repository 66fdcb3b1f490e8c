use crate::domain::model::LocalRecord;

/// Ordered lookup keys for a record: common name first, scientific name second.
///
/// Blank names are skipped and a scientific name that only repeats the common
/// name is not retried. The result is never empty; a record with no usable
/// name yields its (blank) common name, which the client answers with
/// `NotFound` without touching the network.
pub fn resolve_keys(record: &LocalRecord) -> Vec<String> {
    let mut keys: Vec<String> = Vec::with_capacity(2);

    for name in [&record.common_name, &record.scientific_name] {
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        if keys.iter().any(|key| key.eq_ignore_ascii_case(name)) {
            continue;
        }
        keys.push(name.to_string());
    }

    if keys.is_empty() {
        keys.push(record.common_name.clone());
    }

    keys
}

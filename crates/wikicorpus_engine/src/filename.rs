const BATCH_PREFIX: &str = "batch_";
const BATCH_SUFFIX: &str = ".json";

/// `batch_{index}.json`
pub fn batch_filename(index: usize) -> String {
    format!("{BATCH_PREFIX}{index}{BATCH_SUFFIX}")
}

/// Inverse of [`batch_filename`]; `None` for anything else in the directory.
pub fn parse_batch_index(filename: &str) -> Option<usize> {
    let digits = filename
        .strip_prefix(BATCH_PREFIX)?
        .strip_suffix(BATCH_SUFFIX)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

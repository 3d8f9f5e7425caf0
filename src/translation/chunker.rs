//! Sentence-bounded splitting of oversized text.
//!
//! The upstream endpoint rejects very long query strings, so texts above
//! [`MAX_CHUNK_LEN`] characters are cut into pieces that each end at a
//! sentence boundary where one exists. Each consumed period is a split
//! point; re-inserting one delimiter per split point reconstructs the
//! original text.

/// Maximum chunk length in characters sent to the endpoint per request.
pub const MAX_CHUNK_LEN: usize = 5_000;

/// Texts longer than this are not translated at all (policy, not an error).
pub const MAX_TEXT_LEN: usize = 50_000;

/// Splits `text` into chunks of at most `max_len` characters, preferring to
/// cut just after the next period at or beyond the length boundary.
///
/// When no period exists ahead of the boundary, the cut falls exactly on the
/// boundary, so a period-free text of `n` characters yields
/// `ceil(n / max_len)` chunks.
pub fn split(text: &str, max_len: usize) -> Vec<String> {
    let max_len = max_len.max(1);
    let chars: Vec<char> = text.chars().collect();

    if chars.len() <= max_len {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut start = 0;

    while chars.len() - start > max_len {
        let boundary = start + max_len;
        match chars[boundary..].iter().position(|&c| c == '.') {
            Some(offset) => {
                let period = boundary + offset;
                chunks.push(chars[start..period].iter().collect());
                // The period itself is consumed as the split delimiter.
                start = period + 1;
            }
            None => {
                chunks.push(chars[start..boundary].iter().collect());
                start = boundary;
            }
        }
    }

    if start < chars.len() {
        chunks.push(chars[start..].iter().collect());
    }

    chunks
}

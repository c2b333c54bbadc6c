//! Whitespace-aware text chunking with overlap.

/// Split text into chunks of at most `chunk_size` characters, where
/// consecutive chunks share roughly `overlap` characters of trailing
/// context. Splits happen on whitespace; a single word longer than
/// `chunk_size` becomes its own chunk rather than being cut mid-word.
pub fn split_text(text: &str, chunk_size: usize, overlap: usize) -> Vec<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return Vec::new();
    }

    let mut chunks = Vec::new();
    let mut start = 0;

    while start < words.len() {
        // Greedily pack words until the next one would overflow the budget.
        let mut end = start;
        let mut len = 0;
        while end < words.len() {
            let add = words[end].chars().count() + usize::from(len > 0);
            if len + add > chunk_size && len > 0 {
                break;
            }
            len += add;
            end += 1;
        }

        chunks.push(words[start..end].join(" "));
        if end >= words.len() {
            break;
        }

        // Walk back from the cut point until ~overlap chars are retained.
        let mut back = end;
        let mut kept = 0;
        while back > start + 1 && kept < overlap {
            back -= 1;
            kept += words[back].chars().count() + 1;
        }
        // Guarantee forward progress even when overlap >= chunk_size.
        start = back.max(start + 1);
    }

    chunks
}

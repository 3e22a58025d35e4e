// Splits normalized text into chunks small enough for the synthesizer.
// Runs after normalization; token = whitespace-separated word.

/// Split `text` into chunks of at most `max_tokens` words.
///
/// Sentences (ending in `.`, `!` or `?` before whitespace, or at a line
/// break) are packed together while they fit. A sentence longer than the
/// limit is split on word boundaries. Whitespace inside a chunk is collapsed
/// to single spaces.
pub fn chunk_for_synthesis(text: &str, max_tokens: usize) -> Vec<String> {
    let max_tokens = max_tokens.max(1);
    let mut chunks = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for sentence in split_sentences(text) {
        let words: Vec<&str> = sentence.split_whitespace().collect();
        if words.is_empty() {
            continue;
        }

        if words.len() > max_tokens {
            flush(&mut current, &mut chunks);
            for piece in words.chunks(max_tokens) {
                chunks.push(piece.join(" "));
            }
            continue;
        }

        // If adding this sentence would exceed the limit, flush current chunk
        if current.len() + words.len() > max_tokens {
            flush(&mut current, &mut chunks);
        }
        current.extend(words);
    }

    flush(&mut current, &mut chunks);
    chunks
}

fn flush(current: &mut Vec<&str>, chunks: &mut Vec<String>) {
    if !current.is_empty() {
        chunks.push(current.join(" "));
        current.clear();
    }
}

fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, ch)) = chars.next() {
        let end = match ch {
            '\n' => Some(i),
            '.' | '!' | '?' => match chars.peek() {
                Some((_, next)) if next.is_whitespace() => Some(i + ch.len_utf8()),
                None => Some(i + ch.len_utf8()),
                _ => None,
            },
            _ => None,
        };

        if let Some(end) = end {
            sentences.push(&text[start..end]);
            start = end;
        }
    }

    if start < text.len() {
        sentences.push(&text[start..]);
    }
    sentences
}

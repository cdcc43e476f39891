//! Text pagination
//!
//! Splits one free-text field into bounded chunks, one chunk per output
//! page. Lengths are counted in `char`s so accented text never gets cut
//! in the middle of a code point.

/// Default chunk size in characters
pub const DEFAULT_MAX_CHUNK_CHARS: usize = 800;

/// Hard cap on chunks produced for a single field
pub const MAX_CHUNKS: usize = 10;

/// Configurable paginator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    /// Maximum characters per chunk
    pub max_chunk_chars: usize,
    /// Maximum number of chunks kept
    pub max_chunks: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self {
            max_chunk_chars: DEFAULT_MAX_CHUNK_CHARS,
            max_chunks: MAX_CHUNKS,
        }
    }
}

impl Paginator {
    /// Create a paginator with a custom chunk size and the default cap
    pub fn new(max_chunk_chars: usize) -> Self {
        Self {
            max_chunk_chars,
            ..Default::default()
        }
    }

    /// Set the chunk cap
    pub fn with_max_chunks(mut self, max_chunks: usize) -> Self {
        self.max_chunks = max_chunks;
        self
    }

    /// Split `text` into chunks.
    ///
    /// Always returns at least one element; blank input yields `[""]`.
    pub fn paginate(&self, text: &str) -> Vec<String> {
        if text.trim().is_empty() {
            return vec![String::new()];
        }

        let max = self.max_chunk_chars.max(1);
        let cap = self.max_chunks.max(1);

        if text.chars().count() <= max {
            return vec![text.to_string()];
        }

        let mut chunks: Vec<String> = Vec::new();
        let mut buffer = String::new();
        let mut buffer_len = 0usize;

        for word in text.split(' ') {
            if chunks.len() >= cap {
                break;
            }

            let word_len = word.chars().count();
            let candidate_len = if buffer.is_empty() {
                word_len
            } else {
                buffer_len + 1 + word_len
            };

            if candidate_len <= max {
                if !buffer.is_empty() {
                    buffer.push(' ');
                }
                buffer.push_str(word);
                buffer_len = candidate_len;
                continue;
            }

            if !buffer.is_empty() {
                chunks.push(std::mem::take(&mut buffer));
            }

            // Oversized tokens are cut into `max`-sized pieces; the tail seeds
            // the next buffer.
            let mut rest = word;
            let mut rest_len = word_len;
            while rest_len > max && chunks.len() < cap {
                let (head, tail) = split_at_char(rest, max);
                chunks.push(head.to_string());
                rest = tail;
                rest_len -= max;
            }
            buffer.push_str(rest);
            buffer_len = rest_len;
        }

        if !buffer.is_empty() {
            chunks.push(buffer);
        }

        if chunks.len() > cap {
            tracing::debug!(
                dropped = chunks.len() - cap,
                "pagination cap reached, trailing content dropped"
            );
            chunks.truncate(cap);
        }

        if chunks.is_empty() {
            chunks.push(String::new());
        }

        chunks
    }
}

/// Split `text` into chunks of at most `max_chunk_chars` with the default cap.
///
/// # Example
///
/// ```
/// use planejamento_core::paginate;
///
/// assert_eq!(paginate("", 800), vec![String::new()]);
/// assert_eq!(paginate("curto", 800), vec!["curto".to_string()]);
/// ```
pub fn paginate(text: &str, max_chunk_chars: usize) -> Vec<String> {
    Paginator::new(max_chunk_chars).paginate(text)
}

fn split_at_char(text: &str, n: usize) -> (&str, &str) {
    match text.char_indices().nth(n) {
        Some((idx, _)) => text.split_at(idx),
        None => (text, ""),
    }
}

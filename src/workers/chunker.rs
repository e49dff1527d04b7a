use unicode_segmentation::UnicodeSegmentation;

pub const CHUNK_CHAR_BUDGET: usize = 1000;

const FILLER_WORDS: [&str; 2] = ["uh", "um"];

pub fn clean_text(text: &str) -> String {
    text.split_whitespace()
        .filter(|token| !is_filler(token))
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_filler(token: &str) -> bool {
    let core = token.trim_matches(|c: char| !c.is_alphanumeric());
    FILLER_WORDS.iter().any(|filler| core.eq_ignore_ascii_case(filler))
}

pub fn split_sentences(text: &str) -> Vec<String> {
    text.split_sentence_bounds()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Greedily packs whole sentences into chunks. A sentence is added while the
/// joined chunk stays under `budget` characters; a single sentence longer than
/// `budget` becomes a chunk of its own.
pub fn chunk_text(text: &str, budget: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0usize;

    for sentence in split_sentences(text) {
        let sentence_chars = sentence.chars().count();
        let separator = usize::from(!current.is_empty());

        if current_chars + separator + sentence_chars < budget {
            if separator == 1 {
                current.push(' ');
            }
            current.push_str(&sentence);
            current_chars += separator + sentence_chars;
        } else {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
            }
            current = sentence;
            current_chars = sentence_chars;
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

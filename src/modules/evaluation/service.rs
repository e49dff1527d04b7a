//! ROUGE-1, ROUGE-2 and ROUGE-L scoring of a generated summary against a reference.

use std::collections::HashMap;
use std::sync::LazyLock;

use rust_stemmers::{Algorithm, Stemmer};

use super::dto::{RougeReport, RougeScore};

pub struct EvaluationService;

impl EvaluationService {
    /// Precision is over `generated`, recall over `reference`.
    #[must_use]
    pub fn score(reference: &str, generated: &str) -> RougeReport {
        let ref_tokens = tokenize(reference);
        let gen_tokens = tokenize(generated);

        RougeReport {
            rouge1: rouge_n(&ref_tokens, &gen_tokens, 1),
            rouge2: rouge_n(&ref_tokens, &gen_tokens, 2),
            rouge_l: rouge_l(&ref_tokens, &gen_tokens),
        }
    }
}

static STEMMER: LazyLock<Stemmer> = LazyLock::new(|| Stemmer::create(Algorithm::English));

/// Lowercases and keeps runs of ASCII letters and digits; everything else
/// separates tokens. Tokens longer than three characters are stemmed.
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(|token| {
            if token.len() > 3 {
                STEMMER.stem(token).into_owned()
            } else {
                token.to_string()
            }
        })
        .collect()
}

fn ngram_counts(tokens: &[String], n: usize) -> HashMap<&[String], usize> {
    let mut counts = HashMap::new();
    if tokens.len() >= n {
        for gram in tokens.windows(n) {
            *counts.entry(gram).or_default() += 1;
        }
    }
    counts
}

fn rouge_n(reference: &[String], generated: &[String], n: usize) -> RougeScore {
    let ref_counts = ngram_counts(reference, n);
    let gen_counts = ngram_counts(generated, n);

    let overlap: usize = gen_counts
        .iter()
        .map(|(gram, count)| (*count).min(ref_counts.get(gram).copied().unwrap_or(0)))
        .sum();

    let ref_total: usize = ref_counts.values().sum();
    let gen_total: usize = gen_counts.values().sum();

    score_from(overlap, ref_total, gen_total)
}

fn rouge_l(reference: &[String], generated: &[String]) -> RougeScore {
    let lcs = longest_common_subsequence(reference, generated);
    score_from(lcs, reference.len(), generated.len())
}

fn score_from(matches: usize, ref_total: usize, gen_total: usize) -> RougeScore {
    let precision = ratio(matches, gen_total);
    let recall = ratio(matches, ref_total);
    RougeScore {
        precision,
        recall,
        f1: harmonic_mean(precision, recall),
    }
}

fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

fn harmonic_mean(a: f64, b: f64) -> f64 {
    if a + b == 0.0 {
        0.0
    } else {
        (2.0 * a * b) / (a + b)
    }
}

fn longest_common_subsequence(a: &[String], b: &[String]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    // Two rolling rows of the classic DP table.
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    for token in a {
        for (j, other) in b.iter().enumerate() {
            curr[j + 1] = if token == other {
                prev[j] + 1
            } else {
                curr[j].max(prev[j + 1])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn identical_texts_score_one_everywhere() {
        let report = EvaluationService::score("the cat sat", "the cat sat");
        for score in [report.rouge1, report.rouge2, report.rouge_l] {
            assert_close(score.precision, 1.0);
            assert_close(score.recall, 1.0);
            assert_close(score.f1, 1.0);
        }
    }

    #[test]
    fn case_and_punctuation_are_ignored() {
        let report = EvaluationService::score("The cat, sat!", "the CAT sat");
        assert_close(report.rouge1.f1, 1.0);
        assert_close(report.rouge_l.f1, 1.0);
    }

    #[test]
    fn precision_and_recall_follow_argument_order() {
        let report = EvaluationService::score("the cat sat on the mat", "the cat");

        assert_close(report.rouge1.precision, 1.0);
        assert_close(report.rouge1.recall, 2.0 / 6.0);
        assert_close(report.rouge2.precision, 1.0);
        assert_close(report.rouge2.recall, 1.0 / 5.0);

        let swapped = EvaluationService::score("the cat", "the cat sat on the mat");
        assert_close(swapped.rouge1.precision, 2.0 / 6.0);
        assert_close(swapped.rouge1.recall, 1.0);
    }

    #[test]
    fn clipped_unigram_counts() {
        // "the" appears twice in the generated text but once in the reference.
        let report = EvaluationService::score("the cat", "the the cat");
        assert_close(report.rouge1.precision, 2.0 / 3.0);
        assert_close(report.rouge1.recall, 1.0);
    }

    #[test]
    fn inflected_forms_match_after_stemming() {
        let report = EvaluationService::score("the cats were running", "the cat was running");
        assert_close(report.rouge1.precision, 0.75);
        assert_close(report.rouge1.recall, 0.75);
        assert_close(report.rouge1.f1, 0.75);
    }

    #[test]
    fn short_tokens_are_not_stemmed() {
        assert_eq!(tokenize("Was running, cats!"), vec!["was", "run", "cat"]);
    }

    #[test]
    fn lcs_respects_order() {
        let report = EvaluationService::score("a b c d", "d c b a");
        assert_close(report.rouge1.f1, 1.0);
        assert_close(report.rouge_l.precision, 0.25);
        assert_close(report.rouge2.f1, 0.0);
    }

    #[test]
    fn scoring_is_deterministic() {
        let reference = "police killed the gunman in a shootout";
        let generated = "the gunman was shot dead by police";
        assert_eq!(
            EvaluationService::score(reference, generated),
            EvaluationService::score(reference, generated)
        );
    }

    #[test]
    fn texts_without_tokens_score_zero() {
        let report = EvaluationService::score("...", "the cat");
        assert_eq!(report, RougeReport::default());
    }
}

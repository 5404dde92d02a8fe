use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;

lazy_static! {
    /// Runs of characters that are neither ASCII word characters nor an apostrophe.
    static ref SEPARATOR: Regex = Regex::new(r"[^A-Za-z0-9_']+").expect("valid regex");
}

pub fn tokenize(text: &str) -> Vec<String> {
    SEPARATOR
        .split(text)
        .filter(|token| !token.is_empty())
        .map(|token| token.to_lowercase())
        .collect()
}

pub fn word_frequencies<S: AsRef<str>>(tokens: &[S]) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for token in tokens {
        *counts.entry(token.as_ref().to_lowercase()).or_insert(0) += 1;
    }
    counts
}

/// Most frequent terms first; ties broken alphabetically.
pub fn top_terms(frequencies: &HashMap<String, usize>, limit: usize) -> Vec<(String, usize)> {
    let mut ranked: Vec<(String, usize)> = frequencies
        .iter()
        .map(|(term, count)| (term.clone(), *count))
        .collect();
    ranked.sort_by(|left, right| right.1.cmp(&left.1).then_with(|| left.0.cmp(&right.0)));
    ranked.truncate(limit);
    ranked
}

use crate::stemmer::stem;
use lazy_static::lazy_static;
use parking_lot::RwLock;
use regex::Regex;
use std::collections::HashMap;
use std::sync::Arc;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

pub const MIN_TOKEN_CHARS: usize = 2;

lazy_static! {
    static ref NON_WORD: Regex = Regex::new(r"[^\w\s]").expect("valid regex");
}

/// Lowercase, decompose (NFD) and drop combining marks.
pub fn fold(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

/// Fold and strip everything that is neither a word character nor whitespace.
pub fn normalize(text: &str) -> String {
    NON_WORD.replace_all(&fold(text), "").into_owned()
}

/// Tokenize text into stemmed terms, in order of appearance.
pub fn tokenize(text: &str) -> Vec<String> {
    normalize(text)
        .split_whitespace()
        .filter(|t| t.chars().count() >= MIN_TOKEN_CHARS)
        .map(stem)
        .collect()
}

/// Sort key for titles: accents and case are ignored first, then ties break
/// on the lowercase text and finally on the raw text, so the order is total.
pub fn collation_key(title: &str) -> (String, String, String) {
    (fold(title), title.to_lowercase(), title.to_string())
}

/// Memoizing front end to [`tokenize`], keyed by the exact input string.
#[derive(Debug, Default)]
pub struct Tokenizer {
    cache: RwLock<HashMap<String, Arc<[String]>>>,
}

impl Tokenizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tokens(&self, text: &str) -> Arc<[String]> {
        if let Some(hit) = self.cache.read().get(text) {
            return Arc::clone(hit);
        }
        let computed: Arc<[String]> = tokenize(text).into();
        // another caller may have raced us here; keep whichever landed first
        Arc::clone(
            self.cache
                .write()
                .entry(text.to_string())
                .or_insert(computed),
        )
    }

    pub fn cached_inputs(&self) -> usize {
        self.cache.read().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cmp::Ordering;

    #[test]
    fn basic_tokenize() {
        let t = tokenize("Introducción a la Administración Pública");
        assert_eq!(t, vec!["introduccion", "la", "administracion", "publica"]);
    }

    #[test]
    fn drops_punctuation_and_short_tokens() {
        assert!(tokenize("¡¿...?!").is_empty());
        assert!(tokenize("").is_empty());
        assert_eq!(tokenize("C++ y  Rust-lang, 2024"), vec!["rustlang", "2024"]);
    }

    #[test]
    fn strips_diacritics() {
        assert_eq!(fold("Ñandú ÁÉÍÓÚ ü"), "nandu aeiou u");
        assert_eq!(tokenize("María"), tokenize("maria"));
    }

    #[test]
    fn caches_by_exact_input() {
        let tokenizer = Tokenizer::new();
        let first = tokenizer.tokens("Derecho Constitucional");
        let second = tokenizer.tokens("Derecho Constitucional");
        assert!(Arc::ptr_eq(&first, &second));
        let _ = tokenizer.tokens("derecho constitucional");
        assert_eq!(tokenizer.cached_inputs(), 2);
    }

    fn compare_titles(a: &str, b: &str) -> Ordering {
        collation_key(a).cmp(&collation_key(b))
    }

    #[test]
    fn titles_compare_ignoring_accents_and_case() {
        assert_eq!(compare_titles("Árbol", "arco"), Ordering::Less);
        assert_eq!(compare_titles("Zona", "ábaco"), Ordering::Greater);
        // equal once folded, still totally ordered
        assert_ne!(compare_titles("educación", "Educacion"), Ordering::Equal);
        assert_eq!(
            compare_titles("Administración Local", "Administración y Gestión"),
            Ordering::Less
        );
    }
}

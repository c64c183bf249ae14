pub mod catalog;
pub mod document;
pub mod engine;
pub mod filter;
pub mod fuzzy;
pub mod index;
pub mod stemmer;
pub mod tokenizer;

pub use catalog::load_catalog;
pub use document::{DocId, Dimension, Document, FacetOption, FilterSelection};
pub use engine::{SearchEngine, DEFAULT_SUGGESTION_LIMIT};
pub use filter::{FilterEngine, FilterStrategy};
pub use fuzzy::FuzzyMatcher;
pub use index::TextIndex;
pub use tokenizer::{tokenize, Tokenizer};

use tv_core::NGramConfig;
use tv_vocab::TermDictionary;

use super::Vectorizer;

/// Looks terms up in a frozen dictionary. Out-of-vocabulary terms have no
/// column and are dropped, which is how pruning narrows the matrix.
#[derive(Debug, Clone, Copy)]
pub struct DictionaryVectorizer<'a> {
    dictionary: &'a TermDictionary,
}

impl<'a> DictionaryVectorizer<'a> {
    pub fn new(dictionary: &'a TermDictionary) -> Self {
        Self { dictionary }
    }

    pub fn dictionary(&self) -> &'a TermDictionary {
        self.dictionary
    }
}

impl Vectorizer for DictionaryVectorizer<'_> {
    fn term_to_column(&self, term: &str) -> Option<usize> {
        self.dictionary.term_id(term)
    }

    fn n_columns(&self) -> usize {
        self.dictionary.len()
    }

    fn ngram_config(&self) -> &NGramConfig {
        self.dictionary.config()
    }
}

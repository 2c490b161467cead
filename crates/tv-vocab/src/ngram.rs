//! N-gram generation over ordered token sequences.

use tv_core::{NGramConfig, Result};

/// Stateless n-gram generator.
///
/// Output is grouped by starting token (ascending) and, within a start,
/// by increasing span length. For `[a, b, c, d]` with range `1..=2`:
/// `a, a_b, b, b_c, c, c_d, d`.
#[derive(Debug, Clone)]
pub struct NGramGenerator {
    config: NGramConfig,
}

impl NGramGenerator {
    pub fn new(config: NGramConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &NGramConfig {
        &self.config
    }

    /// Number of n-grams a sequence of `len` tokens produces.
    ///
    /// Each span length `n` contributes `len - n + 1` n-grams, or nothing
    /// when the sequence is shorter than `n`.
    pub fn expected_len(&self, len: usize) -> usize {
        (self.config.ngram_min..=self.config.ngram_max.min(len))
            .map(|n| len - n + 1)
            .sum()
    }

    /// Visit every n-gram in output order without allocating per n-gram.
    pub fn for_each_ngram<S, F>(&self, tokens: &[S], mut f: F)
    where
        S: AsRef<str>,
        F: FnMut(&str),
    {
        let (min, max) = (self.config.ngram_min, self.config.ngram_max);
        let delimiter = self.config.delimiter.as_str();
        let mut gram = String::new();

        for start in 0..tokens.len() {
            let end = tokens.len().min(start.saturating_add(max));
            gram.clear();
            for (k, token) in tokens[start..end].iter().enumerate() {
                if k > 0 {
                    gram.push_str(delimiter);
                }
                gram.push_str(token.as_ref());
                if k + 1 >= min {
                    f(&gram);
                }
            }
        }
    }

    /// Collect all n-grams of `tokens`.
    pub fn generate<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<String> {
        let mut out = Vec::with_capacity(self.expected_len(tokens.len()));
        self.for_each_ngram(tokens, |gram| out.push(gram.to_string()));
        debug_assert_eq!(out.len(), self.expected_len(tokens.len()));
        out
    }
}

impl Default for NGramGenerator {
    fn default() -> Self {
        Self { config: NGramConfig::default() }
    }
}

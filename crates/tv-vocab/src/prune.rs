//! Frequency-threshold pruning of a term dictionary.

use tracing::debug;
use tv_core::{PruneConfig, Result, TermStat};

use crate::dictionary::TermDictionary;

/// Build a new dictionary holding only the terms that satisfy every bound
/// of `config`.
///
/// Survivors get dense ids `[0, k)` in their original first-seen order.
/// `document_count` and `token_count` carry over unchanged so proportions
/// and idf stay meaningful downstream. The source is not modified.
pub fn prune(dictionary: &TermDictionary, config: &PruneConfig) -> Result<TermDictionary> {
    config.validate()?;
    let documents = dictionary.document_count();

    let mut kept: Vec<usize> = dictionary
        .iter()
        .filter(|(_, stat)| retains(stat, documents, config))
        .map(|(_, stat)| stat.term_id)
        .collect();

    if let Some(max_terms) = config.max_terms {
        if kept.len() > max_terms {
            let count = |id: usize| dictionary.stat_by_id(id).map_or(0, |s| s.global_count);
            kept.sort_by(|&a, &b| count(b).cmp(&count(a)).then(a.cmp(&b)));
            kept.truncate(max_terms);
            kept.sort_unstable();
        }
    }

    let mut pruned = TermDictionary::empty(
        dictionary.config().clone(),
        documents,
        dictionary.token_count(),
    );
    for id in kept {
        if let (Some(term), Some(stat)) = (dictionary.term(id), dictionary.stat_by_id(id)) {
            pruned.push_term(term, stat.global_count, stat.doc_count);
        }
    }

    debug!(
        before = dictionary.len(),
        after = pruned.len(),
        documents,
        "pruned vocabulary"
    );
    Ok(pruned)
}

fn retains(stat: &TermStat, documents: u64, config: &PruneConfig) -> bool {
    let proportion = if documents == 0 {
        0.0
    } else {
        stat.doc_count as f64 / documents as f64
    };
    (config.term_count_min..=config.term_count_max).contains(&stat.global_count)
        && (config.doc_count_min..=config.doc_count_max).contains(&stat.doc_count)
        && proportion >= config.doc_proportion_min
        && proportion <= config.doc_proportion_max
}

impl TermDictionary {
    /// See [`prune`].
    pub fn prune(&self, config: &PruneConfig) -> Result<TermDictionary> {
        prune(self, config)
    }
}

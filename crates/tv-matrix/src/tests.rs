use crate::*;
use tv_core::{Document, NGramConfig, PruneConfig, TfIdfConfig, VectorizeError};
use tv_vocab::{TermDictionary, VocabularyBuilder};

fn corpus() -> Vec<Document> {
    vec![Document::new("d0", ["a", "a", "b"]), Document::new("d1", ["b", "c"])]
}

fn dictionary(docs: &[Document]) -> TermDictionary {
    let mut builder = VocabularyBuilder::new(NGramConfig::unigram()).unwrap();
    builder.insert_document_batch(docs);
    builder.into_dictionary()
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-12
}

// ========== SparseMatrix ==========

#[test]
fn test_sparse_empty() {
    let m = SparseMatrix::empty(4);
    assert_eq!(m.rows(), 0);
    assert_eq!(m.cols(), 4);
    assert_eq!(m.nnz(), 0);
    assert_eq!(m.entries().count(), 0);
    assert_eq!(m.get(0, 0), 0.0);
}

#[test]
fn test_sparse_from_triplets_sums_duplicates() {
    let m = SparseMatrix::from_triplets(
        2,
        3,
        vec!["r0".into(), "r1".into()],
        vec![(1, 2, 1.0), (0, 1, 2.0), (1, 2, 3.0), (0, 0, 1.0)],
    )
    .unwrap();
    assert_eq!(m.nnz(), 3);
    assert_eq!(m.get(1, 2), 4.0);
    assert_eq!(m.get(0, 1), 2.0);
    assert_eq!(m.get(1, 0), 0.0);
    let entries: Vec<_> = m.entries().collect();
    assert_eq!(entries, vec![(0, 0, 1.0), (0, 1, 2.0), (1, 2, 4.0)]);
}

#[test]
fn test_sparse_from_triplets_out_of_bounds() {
    let err = SparseMatrix::from_triplets(1, 2, vec!["r".into()], vec![(0, 2, 1.0)]).unwrap_err();
    assert!(matches!(err, VectorizeError::OutOfBounds { row: 0, col: 2, .. }));
}

#[test]
fn test_sparse_from_triplets_label_count() {
    let err = SparseMatrix::from_triplets(2, 2, vec!["only".into()], Vec::new()).unwrap_err();
    assert!(matches!(err, VectorizeError::LabelCountMismatch { expected: 2, found: 1 }));
}

#[test]
fn test_sparse_empty_rows_kept() {
    let m = SparseMatrix::from_triplets(
        3,
        2,
        vec!["a".into(), "b".into(), "c".into()],
        vec![(2, 1, 5.0)],
    )
    .unwrap();
    assert_eq!(m.rows(), 3);
    assert_eq!(m.row(0).count(), 0);
    assert_eq!(m.row(1).count(), 0);
    assert_eq!(m.row_sums(), vec![0.0, 0.0, 5.0]);
}

#[test]
fn test_sparse_row_out_of_range() {
    let m = SparseMatrix::empty(2);
    assert_eq!(m.row(5).count(), 0);
}

#[test]
fn test_sparse_column_document_frequency() {
    let m = SparseMatrix::from_triplets(
        3,
        3,
        vec!["0".into(), "1".into(), "2".into()],
        vec![(0, 0, 2.0), (1, 0, 1.0), (2, 1, 1.0), (2, 0, 7.0)],
    )
    .unwrap();
    assert_eq!(m.column_document_frequency(), vec![3, 1, 0]);
}

#[test]
fn test_sparse_vstack() {
    let top = SparseMatrix::from_triplets(1, 2, vec!["t".into()], vec![(0, 1, 1.0)]).unwrap();
    let bottom =
        SparseMatrix::from_triplets(2, 2, vec!["b0".into(), "b1".into()], vec![(1, 0, 2.0)])
            .unwrap();
    let m = top.vstack(&bottom).unwrap();
    assert_eq!(m.rows(), 3);
    assert_eq!(m.row_labels(), &["t", "b0", "b1"]);
    assert_eq!(m.get(0, 1), 1.0);
    assert_eq!(m.get(2, 0), 2.0);
    assert_eq!(m.nnz(), 2);
}

#[test]
fn test_sparse_vstack_width_mismatch() {
    let a = SparseMatrix::empty(2);
    let b = SparseMatrix::empty(3);
    assert!(matches!(a.vstack(&b), Err(VectorizeError::ShapeMismatch { expected: 2, found: 3 })));
}

#[test]
fn test_sparse_to_csr() {
    let m = SparseMatrix::from_triplets(
        2,
        3,
        vec!["r0".into(), "r1".into()],
        vec![(0, 2, 1.5), (1, 0, 2.0)],
    )
    .unwrap();
    let csr = m.to_csr();
    assert_eq!(csr.rows(), 2);
    assert_eq!(csr.cols(), 3);
    assert_eq!(csr.nnz(), 2);
    assert_eq!(csr.get(0, 2), Some(&1.5));
    assert_eq!(csr.get(1, 1), None);
}

#[test]
fn test_sparse_to_dense() {
    let m = SparseMatrix::from_triplets(1, 3, vec!["r".into()], vec![(0, 1, 4.0)]).unwrap();
    assert_eq!(m.to_dense(), vec![vec![0.0, 4.0, 0.0]]);
}

// ========== Vectorizers ==========

#[test]
fn test_dictionary_vectorizer_lookup() {
    let dict = dictionary(&corpus());
    let v = DictionaryVectorizer::new(&dict);
    assert_eq!(v.term_to_column("a"), Some(0));
    assert_eq!(v.term_to_column("c"), Some(2));
    assert_eq!(v.term_to_column("zzz"), None);
    assert_eq!(v.n_columns(), 3);
    assert_eq!(v.ngram_config(), dict.config());
}

#[test]
fn test_hash_vectorizer_in_range() {
    let v = HashVectorizer::new(NGramConfig::unigram(), 4).unwrap();
    for i in 0..500 {
        let col = v.term_to_column(&format!("term{i}")).unwrap();
        assert!(col < 4);
    }
    assert_eq!(v.n_columns(), 4);
}

#[test]
fn test_hash_vectorizer_non_power_of_two() {
    let v = HashVectorizer::new(NGramConfig::unigram(), 7).unwrap();
    for i in 0..500 {
        assert!(v.column(&format!("t{i}")) < 7);
    }
}

#[test]
fn test_hash_vectorizer_deterministic() {
    let a = HashVectorizer::new(NGramConfig::unigram(), 1 << 10).unwrap();
    let b = HashVectorizer::new(NGramConfig::unigram(), 1 << 10).unwrap();
    assert_eq!(a.column("hello"), b.column("hello"));
    assert_eq!(a.column("hello"), a.column("hello"));
}

#[test]
fn test_hash_vectorizer_zero_size() {
    assert!(matches!(
        HashVectorizer::new(NGramConfig::unigram(), 0),
        Err(VectorizeError::InvalidHashSize(0))
    ));
}

#[test]
fn test_hash_vectorizer_invalid_ngram() {
    let bad = NGramConfig { ngram_min: 0, ngram_max: 1, delimiter: "_".into() };
    assert!(HashVectorizer::new(bad, 8).is_err());
}

#[test]
fn test_hash_vectorizer_custom_hasher() {
    use std::collections::hash_map::RandomState;
    let v = HashVectorizer::with_hasher(NGramConfig::unigram(), 16, RandomState::new()).unwrap();
    assert!(v.term_to_column("x").unwrap() < 16);
}

// ========== Assembler ==========

#[test]
fn test_assembler_dictionary_counts() {
    let docs = corpus();
    let dict = dictionary(&docs);
    let m = build(DictionaryVectorizer::new(&dict), &docs).unwrap();
    assert_eq!(m.rows(), 2);
    assert_eq!(m.cols(), 3);
    assert_eq!(m.row(0).collect::<Vec<_>>(), vec![(0, 2.0), (1, 1.0)]);
    assert_eq!(m.row(1).collect::<Vec<_>>(), vec![(1, 1.0), (2, 1.0)]);
    assert_eq!(m.row_labels(), &["d0", "d1"]);
}

#[test]
fn test_assembler_drops_out_of_vocabulary() {
    let docs = corpus();
    let dict = dictionary(&docs).prune(&PruneConfig::new().term_count_min(2)).unwrap();
    let m = build(DictionaryVectorizer::new(&dict), &docs).unwrap();
    assert_eq!(m.cols(), 2);
    assert_eq!(m.row_sums(), vec![3.0, 1.0]);
    assert_eq!(m.get(1, 1), 1.0);
}

#[test]
fn test_assembler_empty_stream() {
    let dict = dictionary(&corpus());
    let m = build(DictionaryVectorizer::new(&dict), Vec::<Document>::new()).unwrap();
    assert_eq!(m.rows(), 0);
    assert_eq!(m.cols(), 3);
}

#[test]
fn test_assembler_empty_document_row() {
    let v = HashVectorizer::new(NGramConfig::unigram(), 8).unwrap();
    let docs = vec![Document::new("empty", Vec::<String>::new()), Document::new("x", ["x"])];
    let m = build(&v, &docs).unwrap();
    assert_eq!(m.rows(), 2);
    assert_eq!(m.row(0).count(), 0);
    assert_eq!(m.row_sums(), vec![0.0, 1.0]);
}

#[test]
fn test_assembler_incremental_partial_result() {
    let v = HashVectorizer::new(NGramConfig::new(1, 2, "_").unwrap(), 32).unwrap();
    let mut assembler = MatrixAssembler::new(&v).unwrap();
    assembler.push_document("first", &["a", "b", "c"]);
    assert_eq!(assembler.rows(), 1);
    let m = assembler.finish();
    assert_eq!(m.rows(), 1);
    assert_eq!(m.row_sums(), vec![5.0]);
    assert_eq!(m.row_labels(), &["first"]);
}

#[test]
fn test_assembler_hash_collisions_summed() {
    let v = HashVectorizer::new(NGramConfig::unigram(), 1).unwrap();
    let m = build(&v, &[Document::new("d", ["a", "b", "c", "a"])]).unwrap();
    assert_eq!(m.nnz(), 1);
    assert_eq!(m.get(0, 0), 4.0);
}

#[test]
fn test_try_build_source_error() {
    let v = HashVectorizer::new(NGramConfig::unigram(), 8).unwrap();
    let docs: Vec<std::result::Result<Document, std::io::Error>> = vec![
        Ok(Document::new("ok", ["a"])),
        Err(std::io::Error::new(std::io::ErrorKind::Other, "disk gone")),
    ];
    let err = try_build(&v, docs).unwrap_err();
    assert!(matches!(err, VectorizeError::Source(_)));
    assert!(err.to_string().contains("disk gone"));
}

#[test]
fn test_try_build_ok() {
    let v = HashVectorizer::new(NGramConfig::unigram(), 8).unwrap();
    let docs: Vec<std::result::Result<Document, anyhow::Error>> =
        vec![Ok(Document::new("a", ["x"])), Ok(Document::new("b", ["y"]))];
    let m = try_build(&v, docs).unwrap();
    assert_eq!(m.row_labels(), &["a", "b"]);
}

// ========== TF-IDF ==========

#[test]
fn test_tfidf_values() {
    let docs = corpus();
    let dict = dictionary(&docs);
    let counts = build(DictionaryVectorizer::new(&dict), &docs).unwrap();
    let weighted = tfidf::transform(&counts);

    let ln23 = (2.0f64 / 3.0).ln();
    assert_eq!(weighted.nnz(), counts.nnz());
    assert!(approx(weighted.get(0, 0), 0.0));
    assert!(approx(weighted.get(0, 1), ln23 / 3.0));
    assert!(approx(weighted.get(1, 1), ln23 / 2.0));
    assert!(approx(weighted.get(1, 2), 0.0));
    assert_eq!(weighted.row_labels(), counts.row_labels());
}

#[test]
fn test_tfidf_idf_ordering() {
    let docs = vec![
        Document::new("0", ["common", "rare"]),
        Document::new("1", ["common"]),
        Document::new("2", ["common"]),
    ];
    let dict = dictionary(&docs);
    let counts = build(DictionaryVectorizer::new(&dict), &docs).unwrap();
    let idf = TfIdf::default().fit(&counts);
    let common = idf.idf()[dict.term_id("common").unwrap()];
    let rare = idf.idf()[dict.term_id("rare").unwrap()];
    assert!(approx(common, (3.0f64 / 4.0).ln()));
    assert!(common < rare);
}

#[test]
fn test_tfidf_smoothing_configurable() {
    let m = SparseMatrix::from_triplets(2, 1, vec!["a".into(), "b".into()], vec![(0, 0, 1.0)])
        .unwrap();
    let idf = TfIdf::new(TfIdfConfig { smoothing: 0.0 }).unwrap().fit(&m);
    assert!(approx(idf.idf()[0], 2.0f64.ln()));
    assert!(TfIdf::new(TfIdfConfig { smoothing: -0.5 }).is_err());
}

#[test]
fn test_tfidf_zero_smoothing_unseen_column_is_finite() {
    let fitted =
        SparseMatrix::from_triplets(1, 2, vec!["seen".into()], vec![(0, 0, 1.0)]).unwrap();
    let idf = TfIdf::new(TfIdfConfig { smoothing: 0.0 }).unwrap().fit(&fitted);
    assert_eq!(idf.idf(), &[0.0, 0.0]);

    // column 1 never occurred in the fitted matrix
    let other =
        SparseMatrix::from_triplets(1, 2, vec!["new".into()], vec![(0, 1, 3.0)]).unwrap();
    let weighted = idf.transform(&other).unwrap();
    assert!(weighted.entries().all(|(_, _, v)| v.is_finite()));
    assert_eq!(weighted.get(0, 1), 0.0);
}

#[test]
fn test_tfidf_fit_transform() {
    let docs = corpus();
    let dict = dictionary(&docs);
    let counts = build(DictionaryVectorizer::new(&dict), &docs).unwrap();
    let tfidf = TfIdf::default();

    let (weights, weighted) = tfidf.fit_transform(&counts);
    assert_eq!(weights, tfidf.fit(&counts));
    assert_eq!(weights.documents(), 2);
    assert_eq!(weighted, tfidf.transform(&counts));
    assert_eq!(weighted, weights.transform(&counts).unwrap());
}

#[test]
fn test_tfidf_empty_row_stays_empty() {
    let m = SparseMatrix::from_triplets(
        2,
        2,
        vec!["empty".into(), "full".into()],
        vec![(1, 0, 2.0)],
    )
    .unwrap();
    let w = tfidf::transform(&m);
    assert_eq!(w.row(0).count(), 0);
    assert_eq!(w.rows(), 2);
}

#[test]
fn test_tfidf_no_rows() {
    let m = SparseMatrix::empty(3);
    let idf = TfIdf::default().fit(&m);
    assert_eq!(idf.idf(), &[0.0, 0.0, 0.0]);
    assert_eq!(tfidf::transform(&m).rows(), 0);
}

#[test]
fn test_idf_weights_apply_to_other_matrix() {
    let train = SparseMatrix::from_triplets(
        2,
        2,
        vec!["a".into(), "b".into()],
        vec![(0, 0, 1.0), (1, 0, 1.0), (1, 1, 1.0)],
    )
    .unwrap();
    let idf = TfIdf::default().fit(&train);
    let test = SparseMatrix::from_triplets(1, 2, vec!["t".into()], vec![(0, 1, 2.0)]).unwrap();
    let w = idf.transform(&test).unwrap();
    assert!(approx(w.get(0, 1), idf.idf()[1]));

    let wide = SparseMatrix::empty(5);
    assert!(matches!(idf.transform(&wide), Err(VectorizeError::ShapeMismatch { .. })));
}

// ========== Pipeline ==========

#[test]
fn test_pipeline_dictionary_mode() {
    let mut p = FeaturePipeline::new(Default::default()).unwrap();
    let docs = corpus();
    p.fit(&docs).unwrap();
    assert_eq!(p.vocabulary().unwrap().len(), 3);
    let m = p.transform(&docs).unwrap();
    assert_eq!(m.to_dense(), vec![vec![2.0, 1.0, 0.0], vec![0.0, 1.0, 1.0]]);
}

#[test]
fn test_pipeline_not_fitted() {
    let p = FeaturePipeline::new(Default::default()).unwrap();
    assert!(matches!(p.transform(&corpus()), Err(VectorizeError::NotFitted)));
}

#[test]
fn test_pipeline_hash_mode_needs_no_fit() {
    let p = FeaturePipeline::from_json(r#"{"hash_size": 16}"#).unwrap();
    assert!(p.is_hashing());
    let m = p.transform(&corpus()).unwrap();
    assert_eq!(m.cols(), 16);
    assert_eq!(m.row_sums(), vec![3.0, 2.0]);
}

#[test]
fn test_pipeline_with_vocabulary_mismatch() {
    let dict = dictionary(&corpus());
    let p = FeaturePipeline::from_json(r#"{"ngram": {"ngram_min": 1, "ngram_max": 2}}"#).unwrap();
    assert!(matches!(p.with_vocabulary(dict), Err(VectorizeError::IdentityMismatch { .. })));
}

#[test]
fn test_pipeline_prune_and_tfidf() {
    let json = r#"{"prune": {"term_count_min": 2}, "tfidf": {}}"#;
    let mut p = FeaturePipeline::from_json(json).unwrap();
    let docs = corpus();
    p.fit(&docs).unwrap();
    assert_eq!(p.vocabulary().unwrap().len(), 2);
    let m = p.transform(&docs).unwrap();
    assert_eq!(m.cols(), 2);
    // a: df 1 -> idf 0; b: df 2 -> ln(2/3)
    assert!(approx(m.get(0, 0), 0.0));
    assert!(approx(m.get(0, 1), (2.0f64 / 3.0).ln() / 3.0));
    assert!(approx(m.get(1, 1), (2.0f64 / 3.0).ln()));
}

use docqa_core::encode::TermFrequencyEncoder;
use docqa_core::error::Error;
use docqa_core::types::{Chunk, ChunkMetadata, ImageRef, SearchFilters};
use docqa_index::ChunkIndex;

fn chunk(id: u32, text: &str, states: &[&str], sections: &[&str], topics: &[&str]) -> Chunk {
    Chunk {
        id,
        text: text.to_string(),
        images: Vec::new(),
        metadata: ChunkMetadata {
            states: states.iter().map(|s| (*s).to_string()).collect(),
            sections: sections.iter().map(|s| (*s).to_string()).collect(),
            topics: topics.iter().map(|s| (*s).to_string()).collect(),
            has_images: false,
            image_count: 0,
            word_count: text.split_whitespace().count(),
        },
    }
}

fn chunk_with_images(id: u32, text: &str, states: &[&str], images: &[(&str, &str)]) -> Chunk {
    let images: Vec<ImageRef> = images
        .iter()
        .map(|(filename, label)| ImageRef {
            filename: (*filename).to_string(),
            label: (*label).to_string(),
        })
        .collect();
    Chunk {
        id,
        text: text.to_string(),
        metadata: ChunkMetadata {
            states: states.iter().map(|s| (*s).to_string()).collect(),
            sections: Default::default(),
            topics: Default::default(),
            has_images: true,
            image_count: images.len(),
            word_count: text.split_whitespace().count(),
        },
        images,
    }
}

fn corpus() -> Vec<Chunk> {
    vec![
        chunk(
            1,
            "rise orders rise limits",
            &["OH"],
            &["Ordering"],
            &["ordering"],
        ),
        chunk(
            2,
            "regular orders calendar",
            &["MD"],
            &["Delivery"],
            &["delivery"],
        ),
        chunk(3, "orders warehouse", &["OH"], &["Ordering"], &["delivery"]),
    ]
}

fn build(chunks: Vec<Chunk>) -> ChunkIndex {
    ChunkIndex::build(chunks, &TermFrequencyEncoder).expect("index builds")
}

#[test]
fn semantic_vectors_are_unit_normalized() {
    let index = build(corpus());
    let vector = index.semantic.vector(1).expect("chunk 1 vector");
    let norm: f32 = vector.values().map(|w| w * w).sum::<f32>().sqrt();
    assert!((norm - 1.0).abs() <= 1e-3, "norm={norm}");
}

#[test]
fn semantic_score_is_zero_for_contentless_chunks() {
    let mut chunks = corpus();
    chunks.push(chunk(9, "of the and", &[], &[], &[]));
    let index = build(chunks);

    let query = TermFrequencyEncoderExt::encode_query("rise orders");
    assert_eq!(index.semantic.score(&query, 9), 0.0);
    assert!(index.semantic.score(&query, 1) > 0.0);
}

// small helper so tests read like the engine's call sites
struct TermFrequencyEncoderExt;
impl TermFrequencyEncoderExt {
    fn encode_query(text: &str) -> docqa_core::encode::SparseVector {
        use docqa_core::encode::SemanticEncoder;
        TermFrequencyEncoder.encode(text)
    }
}

#[test]
fn tfidf_term_in_every_chunk_weighs_zero() {
    let index = build(corpus());
    // "orders" appears in all three chunks
    assert_eq!(index.keyword.document_frequency("orders"), 3);
    for id in [1, 2, 3] {
        assert_eq!(index.keyword.weight(id, "orders"), 0.0);
    }
}

#[test]
fn tfidf_weights_follow_tf_times_idf() {
    let index = build(corpus());
    let ln3 = 3.0f32.ln();
    // "rise" occurs twice in chunk 1 and nowhere else
    assert!((index.keyword.weight(1, "rise") - 2.0 * ln3).abs() <= 1e-5);
    assert!((index.keyword.weight(1, "limits") - ln3).abs() <= 1e-5);
    assert_eq!(index.keyword.weight(2, "rise"), 0.0);
}

#[test]
fn keyword_query_score_is_the_mean_over_query_terms() {
    let index = build(corpus());
    let ln3 = 3.0f32.ln();
    let terms = vec!["rise".to_string(), "orders".to_string()];
    let expected = (2.0 * ln3 + 0.0) / 2.0;
    assert!((index.keyword.query_score(&terms, 1) - expected).abs() <= 1e-5);

    assert_eq!(index.keyword.query_score(&[], 1), 0.0);
    assert_eq!(index.keyword.query_score(&terms, 42), 0.0);
}

#[test]
fn top_terms_rank_by_weight() {
    let index = build(corpus());
    let top = index.keyword.top_terms(1);
    assert_eq!(top[0].0, "rise");
    assert_eq!(top[1].0, "limits");
    // the everywhere-term lands last at weight zero
    assert_eq!(top.last().map(|(term, _)| term.as_str()), Some("orders"));
    assert_eq!(index.keyword.top_terms(42), &[]);
}

#[test]
fn inverted_lists_keep_processing_order() {
    let index = build(corpus());
    assert_eq!(index.metadata.chunks_for_state("OH"), &[1, 3]);
    assert_eq!(index.metadata.chunks_for_state("MD"), &[2]);
    assert_eq!(index.metadata.chunks_for_section("Ordering"), &[1, 3]);
    assert_eq!(index.metadata.chunks_for_topic("delivery"), &[2, 3]);
    assert_eq!(index.metadata.chunks_for_state("ZZ"), &[]);
}

#[test]
fn narrowing_intersects_dimensions_and_unions_values() {
    let index = build(corpus());

    let mut by_state = SearchFilters::default();
    by_state.states.insert("OH".to_string());
    let candidates = index.metadata.narrow(&by_state);
    assert_eq!(candidates, vec![1, 3]);
    for id in &candidates {
        let chunk = index.chunk(*id).expect("candidate exists");
        assert!(chunk.metadata.states.contains("OH"));
    }

    let mut two_dims = by_state.clone();
    two_dims.topics.insert("ordering".to_string());
    assert_eq!(index.metadata.narrow(&two_dims), vec![1]);

    let mut union_states = SearchFilters::default();
    union_states.states.insert("OH".to_string());
    union_states.states.insert("MD".to_string());
    assert_eq!(index.metadata.narrow(&union_states), vec![1, 2, 3]);

    let mut unknown = SearchFilters::default();
    unknown.states.insert("ZZ".to_string());
    assert_eq!(index.metadata.narrow(&unknown), Vec::<u32>::new());

    assert_eq!(index.metadata.narrow(&SearchFilters::default()), vec![1, 2, 3]);
}

#[test]
fn narrowing_by_image_presence() {
    let mut chunks = corpus();
    chunks.push(chunk_with_images(
        4,
        "use the order request form shown below",
        &["OH"],
        &[("order_request_form.png", "Order Request Form")],
    ));
    let index = build(chunks);

    let mut with_images = SearchFilters::default();
    with_images.has_images = Some(true);
    assert_eq!(index.metadata.narrow(&with_images), vec![4]);

    let mut without = SearchFilters::default();
    without.has_images = Some(false);
    assert_eq!(index.metadata.narrow(&without), vec![1, 2, 3]);
}

#[test]
fn image_keywords_come_from_labels_and_file_stems() {
    let mut chunks = corpus();
    chunks.push(chunk_with_images(
        4,
        "use the order request form shown below",
        &["OH"],
        &[("order_request_form.png", "Order Request Form")],
    ));
    let index = build(chunks);

    let entry = index.image.entry(4).expect("entry for chunk 4");
    let keywords: Vec<&str> = entry.keywords.iter().map(String::as_str).collect();
    assert_eq!(keywords, vec!["form", "order", "request"]);
    assert!(index.image.entry(1).is_none());
}

#[test]
fn image_score_is_the_matched_keyword_fraction() {
    let mut chunks = corpus();
    chunks.push(chunk_with_images(
        4,
        "use the order request form shown below",
        &["OH"],
        &[("order_request_form.png", "Order Request Form")],
    ));
    let index = build(chunks);

    assert_eq!(index.image.score(4, "show me the order request form"), 1.0);
    let partial = index.image.score(4, "where do i get the form");
    assert!((partial - 1.0 / 3.0).abs() <= 1e-6);
    assert_eq!(index.image.score(4, "delivery calendar"), 0.0);
    // chunks without images always score zero
    assert_eq!(index.image.score(1, "order request form"), 0.0);
}

#[test]
fn image_matching_is_literal_substring() {
    let mut chunks = corpus();
    chunks.push(chunk_with_images(
        4,
        "use the order request form shown below",
        &["OH"],
        &[("order_request_form.png", "Order Request Form")],
    ));
    let index = build(chunks);

    // "reordered" contains "order", "requests" contains "request"
    let score = index.image.score(4, "reordered requests formality");
    assert_eq!(score, 1.0);
}

#[test]
fn build_rejects_duplicate_ids() {
    let mut chunks = corpus();
    chunks.push(chunk(2, "second two", &[], &[], &[]));
    let err = ChunkIndex::build(chunks, &TermFrequencyEncoder).expect_err("duplicate id");
    assert!(matches!(err, Error::InvalidChunk { id: 2, .. }));
}

#[test]
fn build_rejects_inconsistent_image_metadata() {
    let mut bad = chunk(7, "says it has images", &[], &[], &[]);
    bad.metadata.has_images = true;
    let err =
        ChunkIndex::build(vec![bad], &TermFrequencyEncoder).expect_err("invariant violation");
    match err {
        Error::InvalidChunk { id, reason } => {
            assert_eq!(id, 7);
            assert!(reason.contains("has_images"));
        }
        other => panic!("unexpected error: {other}"),
    }

    let mut also_bad = chunk_with_images(8, "images without the flag", &[], &[("a.png", "A")]);
    also_bad.metadata.has_images = false;
    also_bad.metadata.image_count = 0;
    let err = ChunkIndex::build(vec![also_bad], &TermFrequencyEncoder)
        .expect_err("invariant violation");
    assert!(matches!(err, Error::InvalidChunk { id: 8, .. }));
}

#[test]
fn empty_collection_builds_a_ready_empty_index() {
    let index = build(Vec::new());
    assert!(index.is_empty());
    assert_eq!(index.len(), 0);
    assert_eq!(index.metadata.narrow(&SearchFilters::default()), Vec::<u32>::new());

    let stats = index.stats();
    assert_eq!(stats.chunks, 0);
    assert_eq!(stats.vocabulary, 0);
    assert_eq!(stats.chunks_with_images, 0);
}

#[test]
fn stats_reflect_the_collection() {
    let mut chunks = corpus();
    chunks.push(chunk_with_images(
        4,
        "use the order request form shown below",
        &["OH"],
        &[("order_request_form.png", "Order Request Form")],
    ));
    let index = build(chunks);

    let stats = index.stats();
    assert_eq!(stats.chunks, 4);
    assert_eq!(stats.tagged_states, 2); // OH, MD
    assert_eq!(stats.tagged_sections, 2); // Ordering, Delivery
    assert_eq!(stats.tagged_topics, 2); // ordering, delivery
    assert_eq!(stats.chunks_with_images, 1);
    assert!(stats.vocabulary > 0);
    assert_eq!(index.keyword.chunk_count(), 4);
}

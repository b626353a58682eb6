use promptql::{
    cosine_similarity, decode, encode, encoded_similarity, PromptqlError, ShapeError,
    EMBEDDING_DIM, ENCODED_LEN,
};

#[allow(clippy::cast_precision_loss)]
fn ramp(scale: f32) -> Vec<f32> {
    (0..EMBEDDING_DIM)
        .map(|i| (i as f32 / 100.0 - 5.0) * scale)
        .collect()
}

#[test]
fn stored_blob_roundtrips_exactly() {
    let vector = ramp(1.0);
    let blob = encode(&vector).unwrap();
    assert_eq!(blob.len(), ENCODED_LEN);

    let decoded = decode(&blob).unwrap();
    assert_eq!(decoded, vector);
}

#[test]
fn self_similarity_is_one() {
    let vector = ramp(0.37);
    let blob = encode(&vector).unwrap();

    let score = encoded_similarity(&blob, &blob).unwrap();
    assert!((score - 1.0).abs() < 1e-9, "score was {score}");
}

#[test]
fn scaled_copies_compare_as_identical() {
    let blob_a = encode(&ramp(1.0)).unwrap();
    let blob_b = encode(&ramp(4.0)).unwrap();

    let score = encoded_similarity(&blob_a, &blob_b).unwrap();
    assert!((score - 1.0).abs() < 1e-9, "score was {score}");
}

#[test]
fn negated_copies_compare_as_opposite() {
    let blob_a = encode(&ramp(1.0)).unwrap();
    let blob_b = encode(&ramp(-1.0)).unwrap();

    let score = encoded_similarity(&blob_a, &blob_b).unwrap();
    assert!((score + 1.0).abs() < 1e-9, "score was {score}");
}

#[test]
fn wrong_width_vectors_are_rejected() {
    assert!(matches!(
        encode(&vec![0.0f32; EMBEDDING_DIM - 1]),
        Err(ShapeError::VectorLength { .. })
    ));
    assert!(matches!(
        encode(&vec![0.0f32; EMBEDDING_DIM + 1]),
        Err(ShapeError::VectorLength { .. })
    ));
}

#[test]
fn wrong_width_blobs_are_rejected_before_scoring() {
    let good = encode(&ramp(1.0)).unwrap();

    let err = encoded_similarity(&good[..ENCODED_LEN - 4], &good).unwrap_err();
    assert!(matches!(
        err,
        PromptqlError::Shape(ShapeError::BlobLength { .. })
    ));
}

#[test]
fn zero_vector_blob_surfaces_a_score_error() {
    let zeros = encode(&vec![0.0f32; EMBEDDING_DIM]).unwrap();
    let other = encode(&ramp(1.0)).unwrap();

    let err = encoded_similarity(&zeros, &other).unwrap_err();
    assert!(err.is_score());
    assert!(!err.is_retryable());
}

#[test]
fn direct_similarity_agrees_with_encoded_path() {
    let a = ramp(1.0);
    let b = ramp(-2.5);

    let direct = cosine_similarity(&a, &b).unwrap();
    let encoded = encoded_similarity(&encode(&a).unwrap(), &encode(&b).unwrap()).unwrap();
    assert!((direct - encoded).abs() < 1e-12);
}

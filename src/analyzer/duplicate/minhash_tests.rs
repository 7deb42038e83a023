use super::*;

fn numbered_words(count: usize) -> String {
    (0..count)
        .map(|i| format!("word{i}"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[test]
fn empty_text_has_no_signature() {
    let hasher = MinHasher::new(MinHashConfig::default());
    assert!(hasher.signature("").is_none());
    assert!(hasher.signature(" \n ").is_none());
}

#[test]
fn signature_length_matches_num_perm() {
    let hasher = MinHasher::new(MinHashConfig {
        num_perm: 64,
        ..MinHashConfig::default()
    });
    let signature = hasher.signature("one two three four").unwrap();
    assert_eq!(signature.len(), 64);
}

#[test]
fn signatures_are_deterministic() {
    let first = MinHasher::new(MinHashConfig::default());
    let second = MinHasher::new(MinHashConfig::default());
    let text = numbered_words(20);
    assert_eq!(first.signature(&text), second.signature(&text));
}

#[test]
fn canonically_equal_texts_have_identical_signatures() {
    let hasher = MinHasher::new(MinHashConfig::default());
    let a = hasher.signature("You  agree to BINDING arbitration").unwrap();
    let b = hasher.signature("you agree to binding\narbitration").unwrap();
    assert!((a.jaccard(&b) - 1.0).abs() < f64::EPSILON);
}

#[test]
fn near_identical_texts_have_high_similarity() {
    let hasher = MinHasher::new(MinHashConfig::default());
    let base = numbered_words(40);
    let variant = format!("{} changed", numbered_words(39));
    let a = hasher.signature(&base).unwrap();
    let b = hasher.signature(&variant).unwrap();
    assert!(a.jaccard(&b) > 0.85, "similarity was {}", a.jaccard(&b));
}

#[test]
fn unrelated_texts_have_low_similarity() {
    let hasher = MinHasher::new(MinHashConfig::default());
    let a = hasher.signature(&numbered_words(30)).unwrap();
    let other: String = (0..30)
        .map(|i| format!("other{i}"))
        .collect::<Vec<_>>()
        .join(" ");
    let b = hasher.signature(&other).unwrap();
    assert!(a.jaccard(&b) < 0.2, "similarity was {}", a.jaccard(&b));
}

#[test]
fn jaccard_of_mismatched_lengths_is_zero() {
    let a = MinHashSignature::new(vec![1, 2, 3]);
    let b = MinHashSignature::new(vec![1, 2]);
    assert!(a.jaccard(&b).abs() < f64::EPSILON);
}

#[test]
fn jaccard_counts_agreeing_slots() {
    let a = MinHashSignature::new(vec![1, 2, 3, 4]);
    let b = MinHashSignature::new(vec![1, 9, 3, 9]);
    assert!((a.jaccard(&b) - 0.5).abs() < f64::EPSILON);
}

use spodcli::utils::*;

#[test]
fn test_generate_code_verifier() {
    let verifier = generate_code_verifier();

    // Should be exactly 128 characters
    assert_eq!(verifier.len(), 128);

    // Should contain only alphanumeric characters
    assert!(verifier.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated verifiers should be different
    let verifier2 = generate_code_verifier();
    assert_ne!(verifier, verifier2);
}

#[test]
fn test_generate_code_challenge() {
    let verifier = "test_verifier_123";
    let challenge = generate_code_challenge(verifier);

    assert!(!challenge.is_empty());

    // Deterministic - same input produces same output
    let challenge2 = generate_code_challenge(verifier);
    assert_eq!(challenge, challenge2);

    let challenge3 = generate_code_challenge("different_verifier");
    assert_ne!(challenge, challenge3);

    // Should be base64-encoded (URL-safe, no padding)
    assert!(
        challenge
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    );
}

#[test]
fn test_similarity_identity() {
    for s in ["Electric Wizard", "Dopethrone", "a", "Sunn O)))"] {
        assert_eq!(similarity(s, s), 1.0);
    }
}

#[test]
fn test_similarity_symmetry() {
    let pairs = [
        ("Electric Wizard", "Electric Wizzard"),
        ("Bell Witch", "Bellwitch"),
        ("Om", "Sleep"),
    ];
    for (a, b) in pairs {
        assert_eq!(similarity(a, b), similarity(b, a));
    }
}

#[test]
fn test_are_similar_threshold() {
    // Near-identical names pass
    assert!(are_similar("Electric Wizard", "Electric Wizzard"));
    assert!(are_similar("Khemmis", "Khemmis"));

    // Unrelated names fail
    assert!(!are_similar("Electric Wizard", "Taylor Swift"));

    // Disjoint short strings score 0
    assert_eq!(similarity("abc", "xyz"), 0.0);
}

#[test]
fn test_normalize_title_strips_disambiguation() {
    assert_eq!(
        normalize_title("Wand (2) - Ganglion Reef"),
        "Wand - Ganglion Reef"
    );

    // Multiple spans in one title
    assert_eq!(
        normalize_title("Ghost (32) - Opus Eponymous (3)"),
        "Ghost - Opus Eponymous"
    );
}

#[test]
fn test_normalize_title_leaves_other_parens_alone() {
    // Non-digit parentheses are kept
    assert_eq!(
        normalize_title("Sleep - Dopesmoker (Live)"),
        "Sleep - Dopesmoker (Live)"
    );

    // Digits without the leading space are kept
    assert_eq!(normalize_title("Blink(182) - Album"), "Blink(182) - Album");

    // Unclosed digits are kept
    assert_eq!(normalize_title("Band (2 - Album"), "Band (2 - Album");
}

#[test]
fn test_normalize_title_idempotent() {
    let titles = [
        "Wand (2) - Ganglion Reef",
        "Sleep - Dopesmoker",
        "Ghost (32) - Opus Eponymous (3)",
    ];
    for title in titles {
        let once = normalize_title(title);
        let twice = normalize_title(&once);
        assert_eq!(once, twice);
    }
}

#[test]
fn test_split_candidate() {
    assert_eq!(
        split_candidate("Sleep - Dopesmoker"),
        Some(("Sleep".to_string(), "Dopesmoker".to_string()))
    );

    // Only the first separator splits
    assert_eq!(
        split_candidate("Earth - Earth 2 - Special Low Frequency Version"),
        Some((
            "Earth".to_string(),
            "Earth 2 - Special Low Frequency Version".to_string()
        ))
    );

    // No separator means no candidate
    assert_eq!(split_candidate("Dopesmoker"), None);
}

#[tokio::test]
async fn test_read_bands_from_file() {
    let dir = std::env::temp_dir();
    let path = dir.join("spodcli_bands_test.txt");
    async_fs::write(&path, "Sleep\n\n  Om  \nBell Witch\n")
        .await
        .unwrap();

    let bands = read_bands_from_file(&path).await.unwrap();
    assert_eq!(bands, vec!["Sleep", "Om", "Bell Witch"]);

    async_fs::remove_file(&path).await.unwrap();
}

use super::*;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn test_identical_strings() {
    assert_close(ratio("Super Game", "Super Game"), 1.0);
}

#[test]
fn test_empty_strings() {
    assert_close(ratio("", ""), 1.0);
    assert_close(ratio("abc", ""), 0.0);
    assert_close(ratio("", "abc"), 0.0);
}

#[test]
fn test_disjoint_strings() {
    assert_close(ratio("abc", "xyz"), 0.0);
}

#[test]
fn test_case_sensitive() {
    assert_close(ratio("abc", "ABC"), 0.0);
}

#[test]
fn test_single_block() {
    // "bcd" is the only common block: 2 * 3 / 8
    assert_close(ratio("abcd", "bcde"), 0.75);
}

#[test]
fn test_roman_numeral_suffix() {
    // "Super Game " matches, "II" vs "2" does not: 2 * 11 / 25
    assert_close(ratio("Super Game II", "Super Game 2"), 0.88);
}

#[test]
fn test_blocks_on_both_sides() {
    // "ab" then "cd" on the right of it: 2 * 4 / 9
    assert_close(ratio("abxcd", "abcd"), 8.0 / 9.0);
}

#[test]
fn test_counts_chars_not_bytes() {
    // "Pok" + "mon" = 6 matched chars out of 7 + 7
    assert_close(ratio("Pokémon", "Pokemon"), 12.0 / 14.0);
}

#[test]
fn test_region_tags_lower_score() {
    let plain = ratio("Super Mario Bros.", "Super Mario Bros");
    let tagged = ratio("Super Mario Bros. (USA)", "Super Mario Bros");
    assert!(plain > tagged);
    assert!(tagged > 0.7);
}

#[test]
fn test_deterministic() {
    let a = "Legend of Zelda, The - A Link to the Past";
    let b = "Zelda - A Link to the Past (Europe)";
    assert_eq!(ratio(a, b).to_bits(), ratio(a, b).to_bits());
}

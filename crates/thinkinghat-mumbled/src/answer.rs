//! Answer matching.

/// Canonical form of a guess or an answer.
///
/// Lower-cases, drops every character outside `[a-z0-9]` and whitespace,
/// collapses whitespace runs to one space, and trims. Two strings match
/// when their normalized forms are equal, so `"Cyber-Monday!"` matches
/// `"cyber monday"` only if the hyphen is typed as a space.
pub fn normalize_answer(input: &str) -> String {
    let kept: String = input
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace())
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn answers_match(guess: &str, answer: &str) -> bool {
    normalize_answer(guess) == normalize_answer(answer)
}

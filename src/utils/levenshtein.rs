//! Edit distance for "did you mean" suggestions.

use strsim::levenshtein;

/// Return the candidate closest to `input` if it is within `max_distance`.
///
/// Ties go to the earliest candidate, so callers should pass candidates in a
/// stable order.
pub fn closest_match<'a, I>(input: &str, candidates: I, max_distance: usize) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<(usize, &'a str)> = None;
    for candidate in candidates {
        let distance = levenshtein(input, candidate);
        if distance > max_distance {
            continue;
        }
        match best {
            Some((best_distance, _)) if best_distance <= distance => {}
            _ => best = Some((distance, candidate)),
        }
    }
    best.map(|(_, candidate)| candidate)
}

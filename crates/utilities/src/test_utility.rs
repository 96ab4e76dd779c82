use rand::Rng;

/// Returns a string of at most `max_length` characters drawn uniformly from
/// the given alphabet. An empty alphabet always yields the empty string.
pub fn random_string<R: Rng>(rng: &mut R, alphabet: &[char], max_length: usize) -> String {
    if alphabet.is_empty() {
        return String::new();
    }

    let length = rng.random_range(0..=max_length);
    (0..length)
        .map(|_| alphabet[rng.random_range(0..alphabet.len())])
        .collect()
}

/// Returns `amount` random strings, see [random_string].
pub fn random_strings<R: Rng>(rng: &mut R, amount: usize, alphabet: &[char], max_length: usize) -> Vec<String> {
    (0..amount)
        .map(|_| random_string(rng, alphabet, max_length))
        .collect()
}

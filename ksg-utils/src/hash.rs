pub fn u8s_from_str(input: &str) -> [u8; 32] {
    blake3::hash(input.as_bytes()).into()
}

/// Derives a 32 byte rng seed from a list of labelled parts, e.g.
/// `seed_from_parts(&["0", "500", "7"])` hashes `"0:500:7"`.
pub fn seed_from_parts<S: AsRef<str>>(parts: &[S]) -> [u8; 32] {
    let joined = parts
        .iter()
        .map(|p| p.as_ref())
        .collect::<Vec<&str>>()
        .join(":");
    u8s_from_str(&joined)
}

/// Builds the author-agnostic comparison key of a scientific name: the first two
/// whitespace-delimited tokens, lowercased, joined by a single space.
pub fn genus_species_key(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .split_whitespace()
        .take(2)
        .collect::<Vec<_>>()
        .join(" ")
}

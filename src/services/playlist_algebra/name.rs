use rand::Rng;

const ADJECTIVES: [&str; 16] = [
    "Amber", "Brisk", "Cosmic", "Dizzy", "Electric", "Fuzzy", "Golden", "Hazy", "Lunar", "Mellow",
    "Neon", "Quiet", "Rusty", "Silver", "Velvet", "Wild",
];

const NOUNS: [&str; 16] = [
    "Anthems", "Beats", "Cassettes", "Echoes", "Grooves", "Hymns", "Jams", "Loops", "Melodies",
    "Mixtapes", "Nocturnes", "Riffs", "Serenades", "Sessions", "Tunes", "Waves",
];

/// Placeholder playlist name such as "Velvet Grooves 42".
pub fn generate_playlist_name() -> String {
    let mut rng = rand::rng();
    let adjective = ADJECTIVES[rng.random_range(0..ADJECTIVES.len())];
    let noun = NOUNS[rng.random_range(0..NOUNS.len())];
    let number: u16 = rng.random_range(1..100);

    format!("{} {} {}", adjective, noun, number)
}

/// Uses the caller's name unless it is blank.
pub fn resolve_playlist_name(requested: Option<&str>) -> String {
    match requested {
        Some(name) if !name.trim().is_empty() => name.to_string(),
        _ => generate_playlist_name(),
    }
}

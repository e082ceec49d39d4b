/// Checks whether `input` reads the same forwards and backwards after
/// stripping everything but ASCII letters and digits and lowercasing.
pub fn check(input: &str) -> bool {
    let clean: Vec<char> = input
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect();

    clean.iter().eq(clean.iter().rev())
}

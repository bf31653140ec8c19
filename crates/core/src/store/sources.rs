/// Clean up a comma-joined source list as delivered by the history API.
///
/// Splits on `,`, strips stray `\` and `"` characters left over from
/// JSON-escaped arrays, trims, drops empty entries and keeps the first
/// occurrence of each source. The result is joined with `", "`, so
/// running it again yields the same string. `None` stays `None`.
pub fn dedup_sources(source: Option<&str>) -> Option<String> {
    let source = source?;
    let mut unique: Vec<String> = Vec::new();
    for part in source.split(',') {
        let cleaned: String = part.chars().filter(|c| *c != '\\' && *c != '"').collect();
        let cleaned = cleaned.trim();
        if cleaned.is_empty() || unique.iter().any(|u| u == cleaned) {
            continue;
        }
        unique.push(cleaned.to_string());
    }
    Some(unique.join(", "))
}

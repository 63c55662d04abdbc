use std::path::PathBuf;

/// Find the recording files whose basename starts with `prefix + "_"`.
///
/// Sources are tried in the order given; the first source with at least
/// one match provides the whole result. Matches are never merged across
/// sources, so an earlier-listed source always wins over a later one.
pub fn find_files(prefix: &str, sources: &[(String, Vec<PathBuf>)]) -> Vec<PathBuf> {
    let needle = format!("{prefix}_");

    for (_, files) in sources {
        let matching: Vec<PathBuf> = files
            .iter()
            .filter(|file| {
                file.file_name()
                    .and_then(|name| name.to_str())
                    .map(|name| name.starts_with(&needle))
                    .unwrap_or(false)
            })
            .cloned()
            .collect();

        if !matching.is_empty() {
            return matching;
        }
    }

    Vec::new()
}

/// Returns the first key whose lowercase form contains one of `candidates`.
///
/// Candidates are tried in order and, for each, keys are scanned in their
/// natural order, so an earlier candidate always beats a later one even when
/// the later one would match an earlier key.
pub fn find_key<'a, I>(keys: I, candidates: &[&str]) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let lowered: Vec<(String, &'a str)> = keys
        .into_iter()
        .map(|key| (key.to_lowercase(), key))
        .collect();

    candidates.iter().find_map(|candidate| {
        let candidate = candidate.to_lowercase();
        lowered
            .iter()
            .find(|(lower, _)| lower.contains(&candidate))
            .map(|(_, original)| *original)
    })
}

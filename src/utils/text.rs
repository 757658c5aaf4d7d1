/// Collapse whitespace runs and cap the result at `max_chars`, appending `...`
/// when shortened. Used to keep upstream error bodies readable in one line.
#[must_use]
pub fn single_line_excerpt(s: &str, max_chars: usize) -> String {
    let collapsed = s.split_whitespace().collect::<Vec<_>>().join(" ");
    match collapsed.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", collapsed[..idx].trim_end()),
        None => collapsed,
    }
}

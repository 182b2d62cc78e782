//! Object key layout for media uploads.

const SEGMENT_MAX: usize = 128;

/// Make a string safe to use as one key segment.
///
/// Keeps ASCII alphanumerics, `.`, `-` and `_`. Every other run of
/// characters collapses to a single `_`. Dot-only segments are replaced so a
/// key can never walk up a directory.
#[must_use]
pub fn sanitize_segment(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut prev_underscore = false;

    for ch in input.chars() {
        let keep = ch.is_ascii_alphanumeric() || ch == '.' || ch == '-' || ch == '_';
        if keep {
            out.push(ch);
            prev_underscore = false;
        } else if !prev_underscore {
            out.push('_');
            prev_underscore = true;
        }
    }

    let sanitized = out.trim_matches('_');
    if sanitized.is_empty() || sanitized.chars().all(|c| c == '.') {
        return "_".to_string();
    }

    let mut capped = sanitized.to_string();
    if capped.len() > SEGMENT_MAX {
        capped.truncate(SEGMENT_MAX);
    }
    capped
}

/// `media/{app_id}/{media_id}/{file_name}`, each segment sanitized.
#[must_use]
pub fn media_key(app_id: &str, media_id: &str, file_name: &str) -> String {
    format!(
        "media/{}/{}/{}",
        sanitize_segment(app_id),
        sanitize_segment(media_id),
        sanitize_segment(file_name)
    )
}

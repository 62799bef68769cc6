//! HTTP span helpers.

/// Replace numeric path segments with `{id}` so routes group in logs.
pub(super) fn normalise_path(path: &str) -> String {
    if path == "/" {
        return "/".to_owned();
    }

    let mut normalised = String::from("/");

    for (index, segment) in path.trim_start_matches('/').split('/').enumerate() {
        if index > 0 {
            normalised.push('/');
        }

        if !segment.is_empty() && segment.bytes().all(|byte| byte.is_ascii_digit()) {
            normalised.push_str("{id}");
        } else {
            normalised.push_str(segment);
        }
    }

    normalised
}

/// Replace `${ENV_VAR}` and `${ENV_VAR:-default}` placeholders.
///
/// A variable that is unset (or set but empty, for the `:-` form) resolves to
/// its default; without a default the placeholder is left as-is.
pub fn substitute_env(input: &str) -> String {
    substitute_env_with(input, |name| std::env::var(name).ok())
}

/// [`substitute_env`] with an injectable lookup, so tests never touch the
/// process environment.
pub(crate) fn substitute_env_with(input: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];
        let Some(end) = after_open.find('}') else {
            // Unterminated, keep the remainder verbatim.
            out.push_str(&rest[start..]);
            return out;
        };

        let body = &after_open[..end];
        let placeholder = &rest[start..start + 2 + end + 1];
        let (name, default) = match body.split_once(":-") {
            Some((name, default)) => (name, Some(default)),
            None => (body, None),
        };

        let value = if name.is_empty() {
            None
        } else {
            match (lookup(name), default) {
                (Some(v), Some(d)) if v.is_empty() => Some(d.to_string()),
                (Some(v), _) => Some(v),
                (None, Some(d)) => Some(d.to_string()),
                (None, None) => None,
            }
        };
        out.push_str(value.as_deref().unwrap_or(placeholder));
        rest = &after_open[end + 1..];
    }

    out.push_str(rest);
    out
}

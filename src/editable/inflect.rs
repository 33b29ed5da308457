//! Naming helpers for model and attribute names.
//!
//! These cover the handful of inflections the helper needs (data-model names,
//! default titles, default submit paths). They are ASCII-oriented and
//! intentionally small: irregular plurals are not handled.

/// Last segment of a namespaced model name (`Admin::User` -> `User`).
pub fn demodulize(name: &str) -> &str {
    name.rsplit("::").next().unwrap_or(name)
}

/// `AdminUser` -> `admin_user`, `HTTPServer` -> `http_server`.
pub fn underscore(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);

    for (i, &ch) in chars.iter().enumerate() {
        if ch.is_ascii_uppercase() {
            let prev = i.checked_sub(1).map(|p| chars[p]);
            let next = chars.get(i + 1).copied();
            let boundary = match prev {
                Some(p) if p.is_ascii_lowercase() || p.is_ascii_digit() => true,
                Some(p) if p.is_ascii_uppercase() => next.is_some_and(|n| n.is_ascii_lowercase()),
                _ => false,
            };
            if boundary {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
        } else if ch == '-' || ch == ' ' {
            out.push('_');
        } else {
            out.push(ch);
        }
    }
    out
}

/// `first_name` -> `First name`, `author_id` -> `Author`.
pub fn humanize(attribute: &str) -> String {
    let base = attribute.strip_suffix("_id").unwrap_or(attribute);
    let spaced = base.trim_start_matches('_').replace('_', " ");
    capitalize(&spaced)
}

/// Uppercases the first character and lowercases the rest.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

pub fn pluralize(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }
    if let Some(stem) = word.strip_suffix('y') {
        if !stem.ends_with(['a', 'e', 'i', 'o', 'u']) {
            return format!("{}ies", stem);
        }
    }
    if word.ends_with(['s', 'x', 'z']) || word.ends_with("ch") || word.ends_with("sh") {
        return format!("{}es", word);
    }
    format!("{}s", word)
}

pub fn singularize(word: &str) -> String {
    if let Some(stem) = word.strip_suffix("ies") {
        return format!("{}y", stem);
    }
    for suffix in ["sses", "xes", "zes", "ches", "shes"] {
        if word.ends_with(suffix) {
            return word[..word.len() - 2].to_string();
        }
    }
    match word.strip_suffix('s') {
        Some(stem) if !stem.ends_with('s') => stem.to_string(),
        _ => word.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demodulize_takes_last_segment() {
        assert_eq!(demodulize("Admin::User"), "User");
        assert_eq!(demodulize("User"), "User");
    }

    #[test]
    fn underscore_handles_camel_case_and_acronyms() {
        assert_eq!(underscore("User"), "user");
        assert_eq!(underscore("AdminUser"), "admin_user");
        assert_eq!(underscore("HTTPServer"), "http_server");
        assert_eq!(underscore("Page2Section"), "page2_section");
    }

    #[test]
    fn humanize_strips_id_and_underscores() {
        assert_eq!(humanize("first_name"), "First name");
        assert_eq!(humanize("author_id"), "Author");
        assert_eq!(humanize("name"), "Name");
    }

    #[test]
    fn capitalize_lowercases_tail() {
        assert_eq!(capitalize("addresses"), "Addresses");
        assert_eq!(capitalize("hELLO"), "Hello");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn pluralize_common_endings() {
        assert_eq!(pluralize("user"), "users");
        assert_eq!(pluralize("category"), "categories");
        assert_eq!(pluralize("day"), "days");
        assert_eq!(pluralize("address"), "addresses");
        assert_eq!(pluralize("match"), "matches");
    }

    #[test]
    fn singularize_common_endings() {
        assert_eq!(singularize("users"), "user");
        assert_eq!(singularize("categories"), "category");
        assert_eq!(singularize("addresses"), "address");
        assert_eq!(singularize("matches"), "match");
        assert_eq!(singularize("address"), "address");
    }
}

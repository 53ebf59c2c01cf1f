//! Minimal English inflection for resource names.

/// Words whose singular form is not derived by suffix rules.
const IRREGULAR_PLURALS: &[(&str, &str)] = &[
    ("people", "person"),
    ("children", "child"),
    ("men", "man"),
    ("women", "woman"),
    ("mice", "mouse"),
    ("geese", "goose"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("indices", "index"),
    ("matrices", "matrix"),
    ("vertices", "vertex"),
    ("statuses", "status"),
    ("addresses", "address"),
    ("aliases", "alias"),
    ("movies", "movie"),
    ("cookies", "cookie"),
];

/// Words that are spelled the same in singular and plural.
const UNCOUNTABLE: &[&str] = &["series", "species", "news", "equipment", "information", "data", "metadata", "sheep", "fish"];

/// Return the singular form of a plural resource name, e.g. `books` to `book`.
///
/// Names that are already singular come back unchanged.
pub fn singularize(word: &str) -> String {
    let lower = word.to_ascii_lowercase();

    if UNCOUNTABLE.contains(&lower.as_str()) {
        return word.to_string();
    }

    if let Some((plural, singular)) = IRREGULAR_PLURALS.iter().find(|(plural, _)| lower.ends_with(plural)) {
        return format!("{}{}", &word[..word.len() - plural.len()], singular);
    }

    if lower.ends_with("ies") && word.len() > 3 {
        return format!("{}y", &word[..word.len() - 3]);
    }

    if ["sses", "xes", "zes", "ches", "shes"].iter().any(|suffix| lower.ends_with(suffix)) {
        return word[..word.len() - 2].to_string();
    }

    if lower.ends_with("ss") || lower.ends_with("us") || lower.ends_with("is") {
        return word.to_string();
    }

    if lower.ends_with('s') && word.len() > 1 {
        return word[..word.len() - 1].to_string();
    }

    word.to_string()
}

/// Upper-case the first character only, e.g. `books` to `Books`.
pub fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

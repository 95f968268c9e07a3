//! Go identifier export rules.

/// Words (and word suffixes) rendered as initialisms.
const INITIALISMS: &[(&str, &str)] = &[("id", "ID"), ("uri", "URI"), ("url", "URL"), ("api", "API")];

/// Words ending in one of these are never rewritten, so `valid` does not
/// become `vaLID`.
const EXCEPTIONS: &[&str] = &["valid", "invalid", "liquid"];

/// Converts a GraphQL name into an exported Go identifier.
///
/// The input is split on `_`; each word has a trailing initialism
/// upper-cased and its first character capitalized, then the words are
/// joined.
///
/// ```
/// use graphql_codegen::capitalize;
///
/// assert_eq!(capitalize("onlineStoreUrl"), "OnlineStoreURL");
/// assert_eq!(capitalize("user_id"), "UserID");
/// assert_eq!(capitalize("statusValid"), "StatusValid");
/// ```
#[must_use]
pub fn capitalize(input: &str) -> String {
    input
        .split('_')
        .map(|word| upper_first(&export_word(word)))
        .collect()
}

fn export_word(word: &str) -> String {
    if let Some((_, initialism)) = INITIALISMS.iter().find(|(key, _)| *key == word) {
        return (*initialism).to_string();
    }

    if EXCEPTIONS.iter().any(|exception| ends_with_ignore_case(word, exception)) {
        return word.to_string();
    }

    for (key, initialism) in INITIALISMS {
        if word.len() > key.len() && ends_with_ignore_case(word, key) {
            let stem = &word[..word.len() - key.len()];
            return format!("{stem}{initialism}");
        }
    }

    word.to_string()
}

/// ASCII case-insensitive suffix test. `suffix` is ASCII, so a match always
/// ends on a char boundary of `word`.
fn ends_with_ignore_case(word: &str, suffix: &str) -> bool {
    word.len() >= suffix.len()
        && word.as_bytes()[word.len() - suffix.len()..].eq_ignore_ascii_case(suffix.as_bytes())
}

fn upper_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

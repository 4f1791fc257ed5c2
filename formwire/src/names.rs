//! Field-name derivation.
//!
//! A declared identifier is split into lower-cased words at `_`, `-` and at every
//! transition into an uppercase letter, so `favorite_numbers`, `FavoriteNumbers`
//! and `favoriteNumbers` all split into `["favorite", "numbers"]`. Each uppercase
//! letter starts a new word, including inside a leading uppercase run
//! (`HTTPPort` splits into `h`, `t`, `t`, `p`, `port`).

/// Split an identifier into lower-cased words.
pub fn words(ident: &str) -> Vec<String> {
    let ident = ident.strip_prefix("r#").unwrap_or(ident);
    let mut words = Vec::new();
    let mut current = String::new();
    for c in ident.chars() {
        if c == '_' || c == '-' {
            if !current.is_empty() {
                words.push(core::mem::take(&mut current));
            }
            continue;
        }
        if c.is_uppercase() && !current.is_empty() {
            words.push(core::mem::take(&mut current));
        }
        current.extend(c.to_lowercase());
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `favoriteNumbers`
pub fn camel_case(words: &[String]) -> String {
    let mut out = String::new();
    for (i, word) in words.iter().enumerate() {
        if i == 0 {
            out.push_str(word);
        } else {
            out.push_str(&capitalize(word));
        }
    }
    out
}

/// `FavoriteNumbers`
pub fn pascal_case(words: &[String]) -> String {
    words.iter().map(|word| capitalize(word)).collect()
}

/// `favorite_numbers`
pub fn snake_case(words: &[String]) -> String {
    words.join("_")
}

/// `favorite-numbers`
pub fn kebab_case(words: &[String]) -> String {
    words.join("-")
}

/// `favoritenumbers`
pub fn flat_case(words: &[String]) -> String {
    words.concat()
}

/// The key a field is written under when it has no alias.
pub fn wire_name(ident: &str) -> String {
    ident.strip_prefix("r#").unwrap_or(ident).to_lowercase()
}

/// Every spelling a field identifier answers to when decoding, without duplicates.
///
/// Order: verbatim, lower-cased, flatcase, camelCase, PascalCase, snake_case,
/// kebab-case.
pub fn spellings(ident: &str) -> Vec<String> {
    let bare = ident.strip_prefix("r#").unwrap_or(ident);
    let words = words(bare);
    let candidates = [
        bare.to_owned(),
        bare.to_lowercase(),
        flat_case(&words),
        camel_case(&words),
        pascal_case(&words),
        snake_case(&words),
        kebab_case(&words),
    ];
    let mut out: Vec<String> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if !candidate.is_empty() && !out.contains(&candidate) {
            out.push(candidate);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn words_split_on_case_and_separators() {
        assert_eq!(words("FavoriteNumbers"), ["favorite", "numbers"]);
        assert_eq!(words("favorite_numbers"), ["favorite", "numbers"]);
        assert_eq!(words("favoriteNumbers"), ["favorite", "numbers"]);
        assert_eq!(words("kebab-case__name"), ["kebab", "case", "name"]);
        assert_eq!(words("HTTPPort"), ["h", "t", "t", "p", "port"]);
        assert_eq!(words("r#type"), ["type"]);
    }

    #[test]
    fn words_handle_multibyte_letters() {
        assert_eq!(words("ÉtéÖffnung"), ["été", "öffnung"]);
        assert_eq!(words("größeWert"), ["größe", "wert"]);
    }

    #[test]
    fn spellings_cover_every_case() {
        assert_eq!(
            spellings("FavoriteNumbers"),
            [
                "FavoriteNumbers",
                "favoritenumbers",
                "favoriteNumbers",
                "favorite_numbers",
                "favorite-numbers",
            ]
        );
        assert_eq!(
            spellings("favorite_numbers"),
            [
                "favorite_numbers",
                "favoritenumbers",
                "favoriteNumbers",
                "FavoriteNumbers",
                "favorite-numbers",
            ]
        );
    }

    #[test]
    fn spellings_of_single_word() {
        assert_eq!(spellings("age"), ["age", "Age"]);
        assert_eq!(spellings("Name"), ["Name", "name"]);
    }

    #[test]
    fn wire_name_lowercases() {
        assert_eq!(wire_name("FavoriteNumbers"), "favoritenumbers");
        assert_eq!(wire_name("birth_date"), "birth_date");
        assert_eq!(wire_name("r#type"), "type");
    }
}

//! Decode spellings of field names, kept in step with `formwire::names`, so that
//! colliding fields fail at compile time.
use {
    crate::common::Field,
    darling::{Error, Result},
    std::collections::HashMap,
};

fn words(ident: &str) -> Vec<String> {
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

/// Verbatim, lower, flat, camel, Pascal, snake and kebab spellings of `ident`.
fn spellings(ident: &str) -> Vec<String> {
    let words = words(ident);
    let camel = words
        .iter()
        .enumerate()
        .map(|(i, word)| if i == 0 { word.clone() } else { capitalize(word) })
        .collect();
    let candidates = [
        ident.to_owned(),
        ident.to_lowercase(),
        words.concat(),
        camel,
        words.iter().map(|word| capitalize(word)).collect(),
        words.join("_"),
        words.join("-"),
    ];
    let mut out: Vec<String> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if !candidate.is_empty() && !out.contains(&candidate) {
            out.push(candidate);
        }
    }
    out
}

/// Reject two fields that answer to the same key, derived spellings first, then
/// aliases.
pub(crate) fn check_collisions(fields: &[Field]) -> Result<()> {
    let names: Vec<String> = fields.iter().map(Field::name).collect();
    let mut owners: HashMap<String, usize> = HashMap::new();
    let mut errors = Error::accumulator();
    let claims = names
        .iter()
        .enumerate()
        .flat_map(|(index, name)| spellings(name).into_iter().map(move |s| (index, s)))
        .chain(
            fields
                .iter()
                .enumerate()
                .filter_map(|(index, field)| Some((index, field.rename.clone()?))),
        );
    for (index, spelling) in claims {
        match owners.get(&spelling) {
            Some(&owner) if owner != index => errors.push(
                Error::custom(format!(
                    "form key `{spelling}` matches both `{}` and `{}`",
                    names[owner], names[index]
                ))
                .with_span(&fields[index].member),
            ),
            Some(_) => {}
            None => {
                owners.insert(spelling, index);
            }
        }
    }
    errors.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spellings_match_runtime_table() {
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
        assert_eq!(spellings("HTTPPort")[1], "httpport");
    }

    fn field(name: &str, rename: Option<&str>) -> Field {
        Field {
            member: syn::Ident::new(name, proc_macro2::Span::call_site()),
            ty: syn::parse_quote!(String),
            rename: rename.map(str::to_owned),
        }
    }

    #[test]
    fn colliding_spellings_are_errors() {
        assert!(check_collisions(&[field("user_name", None), field("username", None)]).is_err());
        assert!(check_collisions(&[field("years", Some("age")), field("age", None)]).is_err());
        assert!(check_collisions(&[field("name", Some("name")), field("age", None)]).is_ok());
        assert!(check_collisions(&[field("name", Some("n")), field("nickname", None)]).is_ok());
    }
}

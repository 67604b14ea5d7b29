//! Conversions between the naming conventions of cases, variants and modules.

/// Convert a case name into the name of its enum variant and payload struct.
///
/// Underscores separate words and are dropped; the first letter of every word is uppercased and
/// everything else is left alone, so `not_found` becomes `NotFound` and `fooBar` becomes `FooBar`.
pub fn to_upper_camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut word_start = true;
    for c in name.chars() {
        if c == '_' {
            word_start = true;
        } else if word_start {
            out.extend(c.to_uppercase());
            word_start = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Convert the name of an enum into the name of its payload module.
///
/// Acronyms are kept together: `HTTPRequest` becomes `http_request`.
pub fn to_snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if !c.is_uppercase() {
            out.push(c);
            continue;
        }
        if i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).map_or(false, |n| n.is_lowercase());
            let boundary = prev.is_lowercase()
                || prev.is_numeric()
                || (prev.is_uppercase() && next_is_lower);
            if prev != '_' && boundary {
                out.push('_');
            }
        }
        out.extend(c.to_lowercase());
    }
    out
}

/// Whether `name` can be used as a variant or struct name.
pub fn is_type_name(name: &str) -> bool {
    match name.chars().next() {
        Some(c) => !c.is_numeric() && syn::parse_str::<syn::Ident>(name).is_ok(),
        None => false,
    }
}

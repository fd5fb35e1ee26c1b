//! Token naming: camelCase conversion and identifier validation.

use once_cell::sync::Lazy;
use regex::Regex;

static IDENTIFIER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("identifier regex is valid")
});

/// Words that cannot be used as an exported `const` name.
const RESERVED_WORDS: &[&str] = &[
    "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete",
    "do", "else", "enum", "export", "extends", "false", "finally", "for", "function", "if",
    "import", "in", "instanceof", "new", "null", "return", "super", "switch", "this", "throw",
    "true", "try", "typeof", "var", "void", "while", "with", "as", "implements", "interface",
    "let", "package", "private", "protected", "public", "static", "yield", "await",
];

/// Convert a dashed or underscored class name to camelCase.
///
/// `primary-button` → `primaryButton`, `nav_item` → `navItem`, `-x` → `x`.
/// The first letter is lowercased; the rest of each word is left untouched.
pub fn camel_case(token: &str) -> String {
    let mut out = String::with_capacity(token.len());
    for word in token.split(['-', '_']).filter(|w| !w.is_empty()) {
        let mut chars = word.chars();
        let Some(first) = chars.next() else { continue };
        if out.is_empty() {
            if word.chars().all(|c| !c.is_lowercase()) {
                out.push_str(&word.to_lowercase());
                continue;
            }
            out.extend(first.to_lowercase());
        } else {
            out.extend(first.to_uppercase());
        }
        out.push_str(chars.as_str());
    }
    out
}

/// Why a token cannot be exported.
pub fn validate_identifier(token: &str) -> Result<(), String> {
    if !IDENTIFIER.is_match(token) {
        return Err(format!("\"{token}\" is not valid TypeScript variable name."));
    }
    if RESERVED_WORDS.contains(&token) {
        return Err(format!("\"{token}\" is a reserved word."));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camel_case_joins_words() {
        assert_eq!(camel_case("primary-button"), "primaryButton");
        assert_eq!(camel_case("nav_item--active"), "navItemActive");
        assert_eq!(camel_case("-leading"), "leading");
        assert_eq!(camel_case("Header"), "header");
        assert_eq!(camel_case("URL"), "url");
        assert_eq!(camel_case("alreadyCamel"), "alreadyCamel");
    }

    #[test]
    fn identifiers_are_validated() {
        assert!(validate_identifier("fooBar").is_ok());
        assert!(validate_identifier("$x_1").is_ok());
        assert_eq!(
            validate_identifier("foo-bar").unwrap_err(),
            "\"foo-bar\" is not valid TypeScript variable name."
        );
        assert_eq!(
            validate_identifier("default").unwrap_err(),
            "\"default\" is a reserved word."
        );
    }
}

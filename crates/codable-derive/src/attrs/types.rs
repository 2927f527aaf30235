//! Key strategy for `#[coding_keys(rename_all = "...")]`.

use darling::FromMeta;

/// Case conversion applied to member and variant names without an explicit key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromMeta)]
pub enum KeyStrategy {
    #[default]
    #[darling(skip)]
    Verbatim,
    #[darling(rename = "camelCase")]
    CamelCase,
    #[darling(rename = "PascalCase")]
    PascalCase,
    #[darling(rename = "snake_case")]
    SnakeCase,
    #[darling(rename = "SCREAMING_SNAKE_CASE")]
    ScreamingSnakeCase,
    #[darling(rename = "kebab-case")]
    KebabCase,
    #[darling(rename = "lowercase")]
    Lowercase,
    #[darling(rename = "UPPERCASE")]
    Uppercase,
}

impl KeyStrategy {
    pub fn apply(&self, name: &str) -> String {
        match self {
            KeyStrategy::Verbatim => name.to_string(),
            KeyStrategy::CamelCase => to_camel_case(name, false),
            KeyStrategy::PascalCase => to_camel_case(name, true),
            KeyStrategy::SnakeCase => to_snake_case(name),
            KeyStrategy::ScreamingSnakeCase => to_snake_case(name).to_ascii_uppercase(),
            KeyStrategy::KebabCase => to_kebab_case(name),
            KeyStrategy::Lowercase => name.to_lowercase(),
            KeyStrategy::Uppercase => name.to_uppercase(),
        }
    }
}

fn to_camel_case(s: &str, upper_first: bool) -> String {
    let mut result = String::with_capacity(s.len());
    let mut capitalize = false;

    for c in s.chars() {
        if c == '_' || c == '-' {
            capitalize = !result.is_empty();
        } else if result.is_empty() {
            if upper_first {
                result.push(c.to_ascii_uppercase());
            } else {
                result.push(c.to_ascii_lowercase());
            }
        } else if capitalize {
            result.push(c.to_ascii_uppercase());
            capitalize = false;
        } else {
            result.push(c);
        }
    }

    result
}

fn to_kebab_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    let mut prev_lower = false;

    for c in s.chars() {
        if c == '_' {
            result.push('-');
            prev_lower = false;
        } else if c.is_ascii_uppercase() {
            if prev_lower {
                result.push('-');
            }
            result.push(c.to_ascii_lowercase());
            prev_lower = false;
        } else {
            result.push(c);
            prev_lower = c.is_ascii_lowercase() || c.is_ascii_digit();
        }
    }

    result
}

fn to_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    let mut prev_lower = false;

    for c in s.chars() {
        if c == '-' {
            result.push('_');
            prev_lower = false;
        } else if c.is_ascii_uppercase() {
            if prev_lower {
                result.push('_');
            }
            result.push(c.to_ascii_lowercase());
            prev_lower = false;
        } else {
            result.push(c);
            prev_lower = c.is_ascii_lowercase() || c.is_ascii_digit();
        }
    }

    result
}

//! Identifier normalization.
//!
//! Table authors write fixture and method names the way they read them
//! (`"my fixture"`, `"click button"`). The executor needs identifiers, so any
//! name containing something other than letters, digits and underscores is
//! collapsed into camel case: the offending characters are dropped and the
//! next kept character is upper-cased. Any Unicode letter or digit counts.
//! Names that are already clean pass through untouched.

/// Separator marking a fully qualified type name, which is never rewritten.
const QUALIFIER: char = '.';

/// Normalizes a fixture/class name. The first kept character is upper-cased.
///
/// ```
/// use slimtable::naming::normalize_type_name;
/// assert_eq!(normalize_type_name("my fixture"), "MyFixture");
/// assert_eq!(normalize_type_name("a.b.MyFixture"), "a.b.MyFixture");
/// ```
pub fn normalize_type_name(name: &str) -> String {
    if name.contains(QUALIFIER) || !needs_normalizing(name) {
        return name.to_string();
    }
    camel_case(name, true)
}

/// Normalizes a method name. The first kept character keeps its case.
///
/// ```
/// use slimtable::naming::normalize_member_name;
/// assert_eq!(normalize_member_name("click button"), "clickButton");
/// ```
pub fn normalize_member_name(name: &str) -> String {
    if !needs_normalizing(name) {
        return name.to_string();
    }
    camel_case(name, false)
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn needs_normalizing(name: &str) -> bool {
    name.chars().any(|c| !is_identifier_char(c))
}

fn camel_case(name: &str, capitalize_first: bool) -> String {
    let mut capitalize_next = capitalize_first;
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        if !is_identifier_char(c) {
            capitalize_next = true;
        } else if capitalize_next {
            out.extend(c.to_uppercase());
            capitalize_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

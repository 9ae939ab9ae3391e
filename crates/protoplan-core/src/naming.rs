//! Name derivations shared by the descriptor graph and the name tables.

/// Compute the JSON name protoc derives for a field.
///
/// Underscores are dropped and the character following one is uppercased;
/// everything else is copied verbatim.
///
/// # Examples
/// ```
/// use protoplan_core::naming::to_json_field_name;
/// assert_eq!(to_json_field_name("foo_bar"), "fooBar");
/// assert_eq!(to_json_field_name("FooBar"), "FooBar");
/// ```
pub fn to_json_field_name(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut capitalize_next = false;
    for c in s.chars() {
        if c == '_' {
            capitalize_next = true;
        } else if capitalize_next {
            result.push(c.to_ascii_uppercase());
            capitalize_next = false;
        } else {
            result.push(c);
        }
    }
    result
}

/// Join a scope and a local name into a dotted full name (no leading dot).
///
/// An empty scope yields the bare name.
pub fn qualify(scope: &str, name: &str) -> String {
    if scope.is_empty() {
        name.to_string()
    } else {
        format!("{scope}.{name}")
    }
}

/// Registry key for a full name: the full name with a leading dot.
pub fn registry_key(full_name: &str) -> String {
    format!(".{full_name}")
}

//! Escaped string-literal rendering of programs.
//!
//! The rendering is valid inside a double-quoted literal in most C-family
//! languages (including Rust): zero becomes `\0`, `"` and `\` are escaped,
//! printable ASCII is kept, other ASCII renders as `\u{x}`. Non-ASCII
//! scalars from embedded names are kept verbatim.

/// Render `program` as a quoted, escaped literal.
pub fn to_literal(program: &str) -> String {
    let mut out = String::with_capacity(program.len() + 2);
    out.push('"');
    for c in program.chars() {
        push_escaped(&mut out, c);
    }
    out.push('"');
    out
}

fn push_escaped(out: &mut String, c: char) {
    match c {
        '\0' => out.push_str("\\0"),
        '\\' | '"' => {
            out.push('\\');
            out.push(c);
        }
        ' '..='~' => out.push(c),
        c if c.is_ascii() => out.push_str(&format!("\\u{{{:x}}}", c as u32)),
        c => out.push(c),
    }
}

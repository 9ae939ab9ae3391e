//! Human-readable dumps of layout plans and name tables.

use std::fmt::Write as _;

use protoplan_core::Colors;

use crate::layout::{Cardinality, FieldLayout, FieldMode, LayoutPlan, Presence};
use crate::names::NameEntry;

/// Render a layout plan: header values, then one row per field.
pub fn dump_layout(plan: &LayoutPlan, colors: Colors) -> String {
    let mut out = String::new();
    let c = &colors;

    writeln!(out, "{}[header]{}", c.blue, c.reset).unwrap();
    writeln!(out, "size              {}", plan.size).unwrap();
    writeln!(out, "fields            {}", plan.fields.len()).unwrap();
    writeln!(out, "required          {}", plan.required_count).unwrap();
    writeln!(out, "explicit_presence {}", plan.explicit_presence_count).unwrap();
    writeln!(out, "dense_below       {}", plan.dense_below).unwrap();

    if plan.fields.is_empty() {
        return out;
    }

    out.push('\n');
    writeln!(out, "{}[fields]{}", c.blue, c.reset).unwrap();
    let number_width = plan
        .fields
        .iter()
        .map(|f| f.number.to_string().len())
        .max()
        .unwrap_or(1);
    let offset_width = width_for(plan.size);
    for field in &plan.fields {
        dump_field(&mut out, field, number_width, offset_width, c);
    }
    out
}

fn dump_field(
    out: &mut String,
    field: &FieldLayout,
    number_width: usize,
    offset_width: usize,
    c: &Colors,
) {
    let presence = match field.presence {
        Presence::None => c.dimmed("-"),
        p => p.to_string(),
    };
    let mut line = format!(
        "#{:<nw$}  {}@{:<ow$}{}  {:<8}  {:<12}",
        field.number,
        c.dim,
        field.offset,
        c.reset,
        field.field_type.name(),
        presence,
        nw = number_width,
        ow = offset_width,
    );
    if field.submessage_index != 0 {
        write!(line, "  M{}", field.submessage_index).unwrap();
    }
    let mode = format_mode(field.mode);
    if !mode.is_empty() {
        write!(line, "  {}", c.dimmed(&mode)).unwrap();
    }
    writeln!(out, "{}", line.trim_end()).unwrap();
}

fn format_mode(mode: FieldMode) -> String {
    let mut parts = Vec::new();
    match mode.cardinality {
        Cardinality::Scalar => {}
        Cardinality::Array => parts.push("repeated"),
        Cardinality::Map => parts.push("map"),
    }
    if mode.is_packed {
        parts.push("packed");
    }
    if mode.is_extension {
        parts.push("extension");
    }
    parts.join(" ")
}

/// Render decoded name-table entries, one per line.
pub fn dump_names(entries: &[NameEntry], colors: Colors) -> String {
    let mut out = String::new();
    let c = &colors;

    writeln!(out, "{}[names]{}", c.blue, c.reset).unwrap();
    for entry in entries {
        match entry {
            NameEntry::Same { number, name } => {
                writeln!(out, "{number:>4}  {}{name}{}", c.green, c.reset).unwrap();
            }
            NameEntry::Standard { number, name } => {
                let json = entry.json_name().unwrap_or_default();
                writeln!(
                    out,
                    "{number:>4}  {}{name}{}  {}",
                    c.green,
                    c.reset,
                    c.dimmed(&format!("json={json}"))
                )
                .unwrap();
            }
            NameEntry::Unique {
                number,
                proto,
                json,
            } => {
                writeln!(
                    out,
                    "{number:>4}  {}{proto}{}  json={json}",
                    c.green, c.reset
                )
                .unwrap();
            }
            NameEntry::Group { number, name } => {
                writeln!(
                    out,
                    "{number:>4}  {}{name}{}  {}",
                    c.green,
                    c.reset,
                    c.dimmed("group")
                )
                .unwrap();
            }
            NameEntry::Aliased {
                number,
                name,
                aliases,
            } => {
                writeln!(
                    out,
                    "{number:>4}  {}{name}{}  aliases={}",
                    c.green,
                    c.reset,
                    aliases.join(",")
                )
                .unwrap();
            }
            NameEntry::ReservedName(name) => {
                writeln!(out, "   -  {}", c.dimmed(&format!("reserved {name:?}"))).unwrap();
            }
            NameEntry::ReservedNumbers(range) => {
                writeln!(
                    out,
                    "   -  {}",
                    c.dimmed(&format!("reserved {}..={}", range.start(), range.end()))
                )
                .unwrap();
            }
        }
    }
    out
}

fn width_for(max: u32) -> usize {
    max.to_string().len()
}

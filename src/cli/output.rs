//! CLI output: error mapping and text rendering of a hierarchy.

use crate::error::CatalogError;
use crate::tree::{Entry, Hierarchy};
use std::collections::HashSet;
use std::fmt::Write;

pub fn map_error(e: &CatalogError) -> String {
    e.to_string()
}

/// Indented outline of the hierarchy, top-level groups in key order
pub fn format_outline(hierarchy: &Hierarchy) -> String {
    let mut out = String::new();
    let mut seen = HashSet::new();
    for (id, entry) in hierarchy.iter() {
        if entry.parent().is_none() {
            write_entry(hierarchy, id, 0, &mut seen, &mut out);
        }
    }
    out
}

fn write_entry(
    hierarchy: &Hierarchy,
    id: &str,
    indent: usize,
    seen: &mut HashSet<String>,
    out: &mut String,
) {
    let Some(entry) = hierarchy.get(id) else {
        return;
    };
    if !seen.insert(id.to_string()) {
        return;
    }
    let pad = "  ".repeat(indent);
    match entry {
        Entry::Group(group) => {
            let marker = if group.is_component { "*" } else { "+" };
            let _ = writeln!(out, "{}{} {} ({})", pad, marker, group.name, group.id);
            for child in &group.children {
                write_entry(hierarchy, child, indent + 1, seen, out);
            }
        }
        Entry::Leaf(leaf) => {
            let _ = writeln!(out, "{}- {} ({})", pad, leaf.name, leaf.id);
        }
    }
}

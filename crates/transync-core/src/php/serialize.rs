use crate::tree::{Node, Tree};
use std::fmt::Write as _;

const INDENT: &str = "    ";

/// Renders a tree as a translation file.
///
/// The output is deterministic: entries keep the order of `tree`, every
/// level is indented by four spaces and every entry ends with a comma.
pub fn serialize(tree: &Tree) -> String {
    let mut out = String::from("<?php\n\nreturn ");
    write_array(&mut out, tree, 0);
    out.push_str(";\n");
    out
}

fn write_array(out: &mut String, tree: &Tree, depth: usize) {
    if tree.is_empty() {
        out.push_str("[]");
        return;
    }

    out.push_str("[\n");
    for (key, node) in tree {
        let indent = INDENT.repeat(depth + 1);
        let _ = write!(out, "{indent}{} => ", render_key(key));
        match node {
            Node::Leaf(value) => out.push_str(&quote(value)),
            Node::Branch(children) => write_array(out, children, depth + 1),
        }
        out.push_str(",\n");
    }
    out.push_str(&INDENT.repeat(depth));
    out.push(']');
}

/// Integer-like keys are written bare so that they read back as integers.
fn render_key(key: &str) -> String {
    match key.parse::<i64>() {
        Ok(index) if index.to_string() == key => key.to_string(),
        _ => quote(key),
    }
}

fn quote(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('\'');
    for c in text.chars() {
        if matches!(c, '\\' | '\'') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('\'');
    quoted
}

//! YAML rendering that keeps strings as strings for YAML 1.1 readers
//!
//! serde_yaml emits YAML 1.2 and only quotes strings that a 1.2 reader would
//! resolve to another type. dbt loads its project files with a YAML 1.1
//! resolver, where plain `yes`, `on`, `2023-01-01` or `0777` become booleans,
//! dates and numbers. Before serializing, every such string (key or value) is
//! swapped for a unique plain marker; after serializing, each marker is
//! replaced by the original text in single quotes.

use regex::Regex;
use serde::Serialize;
use serde_yaml::{Mapping, Value};
use std::sync::LazyLock;

use crate::error::Result;

static YAML11_IMPLICIT: LazyLock<Regex> = LazyLock::new(|| {
    let patterns = [
        // bool
        r"y|Y|yes|Yes|YES|n|N|no|No|NO|true|True|TRUE|false|False|FALSE|on|On|ON|off|Off|OFF",
        // null
        r"~|null|Null|NULL",
        // int
        r"[-+]?0b[0-1_]+",
        r"[-+]?0[0-7_]+",
        r"[-+]?(?:0|[1-9][0-9_]*)",
        r"[-+]?0x[0-9a-fA-F_]+",
        r"[-+]?[1-9][0-9_]*(?::[0-5]?[0-9])+",
        // float
        r"[-+]?[0-9][0-9_]*\.[0-9_]*(?:[eE][-+]?[0-9]+)?",
        r"[-+]?\.[0-9_]+(?:[eE][-+]?[0-9]+)?",
        r"[-+]?[0-9][0-9_]*(?::[0-5]?[0-9])+\.[0-9_]*",
        r"[-+]?\.(?:inf|Inf|INF)",
        r"\.(?:nan|NaN|NAN)",
        // timestamp
        r"[0-9]{4}-[0-9]{2}-[0-9]{2}",
        r"[0-9]{4}-[0-9]{1,2}-[0-9]{1,2}(?:[Tt]|[ \t]+)[0-9]{1,2}:[0-9]{2}:[0-9]{2}(?:\.[0-9]*)?(?:[ \t]*(?:Z|[-+][0-9]{1,2}(?::[0-9]{2})?))?",
        // merge and value keys
        r"<<|=",
    ];
    let pattern = format!("^(?:{})$", patterns.join("|"));
    Regex::new(&pattern).expect("valid regex")
});

/// True if a YAML 1.1 reader would load this plain scalar as something other than a string
pub fn is_ambiguous(s: &str) -> bool {
    s.is_empty() || YAML11_IMPLICIT.is_match(s)
}

/// Serialize `value` to block YAML, single-quoting strings YAML 1.1 would re-type
pub fn to_string<T: Serialize>(value: &T) -> Result<String> {
    let mut tree = serde_yaml::to_value(value)?;

    let plain = serde_yaml::to_string(&tree)?;
    let mut marker = String::from("__snowgen_quoted_");
    while plain.contains(&marker) {
        marker.push('_');
    }

    let mut quoted = Vec::new();
    tree = mark(tree, &marker, &mut quoted);

    let mut text = serde_yaml::to_string(&tree)?;
    // Highest index first so `_1__` never clobbers part of `_10__`
    for (i, original) in quoted.iter().enumerate().rev() {
        let single_quoted = format!("'{}'", original.replace('\'', "''"));
        text = text.replace(&placeholder(&marker, i), &single_quoted);
    }
    Ok(text)
}

fn placeholder(marker: &str, index: usize) -> String {
    format!("{}{}__", marker, index)
}

fn mark(value: Value, marker: &str, quoted: &mut Vec<String>) -> Value {
    match value {
        Value::String(s) if is_ambiguous(&s) => {
            let token = placeholder(marker, quoted.len());
            quoted.push(s);
            Value::String(token)
        }
        Value::Sequence(items) => Value::Sequence(items.into_iter().map(|v| mark(v, marker, quoted)).collect()),
        Value::Mapping(map) => {
            let mut out = Mapping::new();
            for (k, v) in map {
                let k = mark(k, marker, quoted);
                let v = mark(v, marker, quoted);
                out.insert(k, v);
            }
            Value::Mapping(out)
        }
        other => other,
    }
}

//! Reading record batches and declarations, writing JSON artifacts.

use anyhow::Context;
use camino::Utf8Path;
use fs_err as fs;
use recordfix_types::{Record, RuleDeclaration};
use serde::Serialize;
use tracing::debug;

/// Read a record batch.
///
/// `.jsonl` / `.ndjson` files hold one record per non-blank line. Any other file is a JSON
/// document: a top-level array is the batch, any other value a batch of one.
pub fn load_records(path: &Utf8Path) -> anyhow::Result<Vec<Record>> {
    let contents = fs::read_to_string(path).with_context(|| format!("read input {}", path))?;

    let records = match path.extension() {
        Some("jsonl") | Some("ndjson") => parse_json_lines(&contents)
            .with_context(|| format!("parse JSON lines from {}", path))?,
        _ => {
            let doc: Record = serde_json::from_str(&contents)
                .with_context(|| format!("parse JSON from {}", path))?;
            match doc {
                Record::Array(items) => items,
                other => vec![other],
            }
        }
    };

    debug!(count = records.len(), "loaded records from {}", path);
    Ok(records)
}

fn parse_json_lines(contents: &str) -> anyhow::Result<Vec<Record>> {
    contents
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str(line).with_context(|| format!("line {}", index + 1))
        })
        .collect()
}

/// Read a rule declaration, picking the format from the file extension.
///
/// `.yaml` / `.yml` and `.toml` are supported next to JSON, the default.
pub fn load_declaration(path: &Utf8Path) -> anyhow::Result<RuleDeclaration> {
    let contents = fs::read_to_string(path).with_context(|| format!("read rules {}", path))?;

    let declaration = match path.extension() {
        Some("yaml") | Some("yml") => serde_yaml::from_str(&contents)
            .with_context(|| format!("parse YAML rules from {}", path))?,
        Some("toml") => {
            toml::from_str(&contents).with_context(|| format!("parse TOML rules from {}", path))?
        }
        _ => serde_json::from_str(&contents)
            .with_context(|| format!("parse JSON rules from {}", path))?,
    };
    Ok(declaration)
}

pub fn write_json<T: Serialize>(path: &Utf8Path, value: &T, pretty: bool) -> anyhow::Result<()> {
    let mut bytes = if pretty {
        serde_json::to_vec_pretty(value)?
    } else {
        serde_json::to_vec(value)?
    };
    bytes.push(b'\n');
    fs::write(path, bytes).with_context(|| format!("write {}", path))?;
    Ok(())
}

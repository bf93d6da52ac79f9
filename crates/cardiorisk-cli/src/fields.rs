//! `FIELD=VALUE` form entries from the command line or a file.

use std::path::Path;

use anyhow::{Context, bail};

/// Split `name=value`. The value may be empty; the name may not.
pub fn parse_assignment(s: &str) -> anyhow::Result<(String, String)> {
    let Some((name, value)) = s.split_once('=') else {
        bail!("expected FIELD=VALUE, got {s:?}");
    };
    let name = name.trim();
    if name.is_empty() {
        bail!("empty field name in {s:?}");
    }
    Ok((name.to_string(), value.to_string()))
}

/// Parse one assignment per line, skipping blank lines and `#` comments.
pub fn parse_lines(text: &str) -> anyhow::Result<Vec<(String, String)>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| {
            let t = line.trim();
            !t.is_empty() && !t.starts_with('#')
        })
        .map(|(i, line)| parse_assignment(line.trim()).with_context(|| format!("line {}", i + 1)))
        .collect()
}

/// Gather entries: file lines first, then command-line assignments.
pub fn collect(file: Option<&Path>, args: &[String]) -> anyhow::Result<Vec<(String, String)>> {
    let mut entries = Vec::new();
    if let Some(path) = file {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        entries.extend(parse_lines(&text).with_context(|| format!("parsing {}", path.display()))?);
    }
    for arg in args {
        entries.push(parse_assignment(arg)?);
    }
    Ok(entries)
}

//! Hygiene — source-level budgets for the records crate
//!
//! Scans `src/` (skipping `_test.rs` files) for constructs that panic or drop
//! errors on the floor. Each pattern has a budget; the budget never grows.

use std::fs;
use std::path::Path;

/// `(pattern, budget)`. A line counts once per pattern it contains.
const PANICS: &[(&str, usize)] = &[
    (".unwrap()", 0),
    // Literal regex patterns in validate.rs.
    (".expect(", 3),
    ("panic!(", 0),
    ("unreachable!(", 0),
    ("todo!(", 0),
    ("unimplemented!(", 0),
];

const DISCARDS: &[(&str, usize)] = &[("let _ =", 0), (".ok()", 0)];

const STRUCTURE: &[(&str, usize)] = &[("#[allow(dead_code)]", 0)];

struct SourceFile {
    path: String,
    content: String,
}

fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect(Path::new("src"), &mut files);
    files
}

fn collect(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect(&path, out);
            continue;
        }
        let path_str = path.to_string_lossy().to_string();
        if !path_str.ends_with(".rs") || path_str.ends_with("_test.rs") {
            continue;
        }
        if let Ok(content) = fs::read_to_string(&path) {
            out.push(SourceFile { path: path_str, content });
        }
    }
}

fn hits(files: &[SourceFile], pattern: &str) -> Vec<(String, usize)> {
    files
        .iter()
        .filter_map(|file| {
            let count = file.content.lines().filter(|line| line.contains(pattern)).count();
            (count > 0).then(|| (file.path.clone(), count))
        })
        .collect()
}

fn check(budgets: &[(&str, usize)]) {
    let files = source_files();
    assert!(!files.is_empty(), "no sources found; run from the crate root");

    let mut failures = Vec::new();
    for (pattern, max) in budgets {
        let found = hits(&files, pattern);
        let count: usize = found.iter().map(|(_, c)| c).sum();
        if count > *max {
            let detail: Vec<String> = found.iter().map(|(path, c)| format!("  {path}: {c}")).collect();
            failures.push(format!("{pattern} budget exceeded: found {count}, max {max}\n{}", detail.join("\n")));
        }
    }
    assert!(failures.is_empty(), "{}", failures.join("\n"));
}

#[test]
fn panic_budgets() {
    check(PANICS);
}

#[test]
fn silent_discard_budgets() {
    check(DISCARDS);
}

#[test]
fn structure_budgets() {
    check(STRUCTURE);
}

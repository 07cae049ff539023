//! Source hygiene checks for the engine crate.
//!
//! Each antipattern has a budget (zero everywhere today). Test files
//! (`*_test.rs`) are exempt; everything else under `src/` is scanned.
#![allow(clippy::absurd_extreme_comparisons)]

use std::fs;
use std::path::Path;

struct SourceFile {
    path: String,
    content: String,
}

/// A pattern and how many lines may contain it.
struct Budget {
    pattern: &'static str,
    max: usize,
    /// Files the pattern is allowed in regardless of budget.
    exempt: &'static [&'static str],
}

// Panics.
const UNWRAP: Budget = Budget { pattern: ".unwrap()", max: 0, exempt: &[] };
const EXPECT: Budget = Budget { pattern: ".expect(", max: 0, exempt: &[] };
const PANIC: Budget = Budget { pattern: "panic!(", max: 0, exempt: &[] };
const UNREACHABLE: Budget = Budget { pattern: "unreachable!(", max: 0, exempt: &[] };
const TODO: Budget = Budget { pattern: "todo!(", max: 0, exempt: &[] };
const UNIMPLEMENTED: Budget = Budget { pattern: "unimplemented!(", max: 0, exempt: &[] };

// Silent loss.
const SILENT_DISCARD: Budget = Budget { pattern: "let _ =", max: 0, exempt: &[] };
const DOT_OK: Budget = Budget { pattern: ".ok()", max: 1, exempt: &[] };

// Structure. Diagnostics go through `tracing`; only the binary prints.
const ALLOW_DEAD_CODE: Budget = Budget { pattern: "#[allow(dead_code)]", max: 0, exempt: &[] };
const PRINTLN: Budget = Budget { pattern: "println!(", max: 0, exempt: &["main.rs"] };

fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect_rs_files(Path::new("src"), &mut files);
    files
}

fn collect_rs_files(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_rs_files(&path, out);
            continue;
        }
        if !path.extension().is_some_and(|e| e == "rs") {
            continue;
        }
        let path_str = path.to_string_lossy().to_string();
        if path_str.ends_with("_test.rs") {
            continue;
        }
        if let Ok(content) = fs::read_to_string(&path) {
            out.push(SourceFile { path: path_str, content });
        }
    }
}

fn hits(files: &[SourceFile], budget: &Budget) -> Vec<(String, usize)> {
    files
        .iter()
        .filter(|file| !budget.exempt.iter().any(|name| file.path.ends_with(name)))
        .filter_map(|file| {
            let count = file.content.lines().filter(|line| line.contains(budget.pattern)).count();
            (count > 0).then(|| (file.path.clone(), count))
        })
        .collect()
}

fn check(budget: &Budget) {
    let files = source_files();
    assert!(!files.is_empty(), "no sources found; run from the crate root");
    let hits = hits(&files, budget);
    let count: usize = hits.iter().map(|(_, c)| c).sum();
    let listing = hits.iter().map(|(path, c)| format!("  {path}: {c}")).collect::<Vec<_>>().join("\n");
    assert!(
        count <= budget.max,
        "`{}` budget exceeded: found {count}, max {}.\n{listing}",
        budget.pattern,
        budget.max
    );
}

#[test]
fn unwrap_budget() {
    check(&UNWRAP);
}

#[test]
fn expect_budget() {
    check(&EXPECT);
}

#[test]
fn panic_budget() {
    check(&PANIC);
}

#[test]
fn unreachable_budget() {
    check(&UNREACHABLE);
}

#[test]
fn todo_budget() {
    check(&TODO);
}

#[test]
fn unimplemented_budget() {
    check(&UNIMPLEMENTED);
}

#[test]
fn silent_discard_budget() {
    check(&SILENT_DISCARD);
}

#[test]
fn dot_ok_budget() {
    check(&DOT_OK);
}

#[test]
fn allow_dead_code_budget() {
    check(&ALLOW_DEAD_CODE);
}

#[test]
fn println_budget() {
    check(&PRINTLN);
}

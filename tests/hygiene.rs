//! Hygiene: source-level standards checked at test time.
//!
//! Scans the production sources under `src/` (sibling `_test.rs` files are
//! exempt) for patterns that panic or silently drop errors. Every budget is
//! zero; a new hit means fixing the code, not raising the number.

use std::fs;
use std::path::{Path, PathBuf};

struct Budget {
    pattern: &'static str,
    max: usize,
    why: &'static str,
}

const BUDGETS: &[Budget] = &[
    // Panics.
    Budget { pattern: ".unwrap()", max: 0, why: "propagate with ? or handle the None/Err" },
    Budget { pattern: ".expect(", max: 0, why: "propagate with ? or handle the None/Err" },
    Budget { pattern: "panic!(", max: 0, why: "return an EngineError" },
    Budget { pattern: "unreachable!(", max: 0, why: "make the state unrepresentable" },
    Budget { pattern: "todo!(", max: 0, why: "finish the stub" },
    Budget { pattern: "unimplemented!(", max: 0, why: "finish the stub" },
    // Shared engine state.
    Budget { pattern: ".borrow_mut()", max: 0, why: "use engine::write_core so re-entry is an error" },
    Budget { pattern: ".borrow()", max: 0, why: "use engine::read_core so re-entry is an error" },
    // Silent loss.
    Budget { pattern: "let _ =", max: 0, why: "log or propagate the result" },
    Budget { pattern: ".ok()", max: 0, why: "log or propagate the error" },
    // Structure.
    Budget { pattern: "#[allow(dead_code)]", max: 0, why: "delete the dead code" },
];

struct SourceFile {
    path: PathBuf,
    content: String,
}

fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect(Path::new(env!("CARGO_MANIFEST_DIR")).join("src").as_path(), &mut files);
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
        let is_rs = path.extension().is_some_and(|e| e == "rs");
        let is_test = path.to_string_lossy().ends_with("_test.rs");
        if is_rs && !is_test {
            if let Ok(content) = fs::read_to_string(&path) {
                out.push(SourceFile { path, content });
            }
        }
    }
}

fn hits(files: &[SourceFile], pattern: &str) -> Vec<(String, usize)> {
    files
        .iter()
        .filter_map(|file| {
            let count = file.content.lines().filter(|line| line.contains(pattern)).count();
            (count > 0).then(|| (file.path.display().to_string(), count))
        })
        .collect()
}

#[test]
fn sources_are_found() {
    assert!(source_files().iter().any(|f| f.path.ends_with("lib.rs")));
}

#[test]
fn budgets_hold() {
    let files = source_files();
    let mut failures = Vec::new();
    for budget in BUDGETS {
        let found = hits(&files, budget.pattern);
        let count: usize = found.iter().map(|(_, c)| c).sum();
        if count > budget.max {
            let listing = found
                .iter()
                .map(|(path, c)| format!("    {path}: {c}"))
                .collect::<Vec<_>>()
                .join("\n");
            failures.push(format!(
                "`{}`: found {count}, max {} ({})\n{listing}",
                budget.pattern, budget.max, budget.why
            ));
        }
    }
    assert!(failures.is_empty(), "hygiene budgets exceeded:\n{}", failures.join("\n"));
}

#[test]
fn every_test_module_has_its_file() {
    let files = source_files();
    let src = Path::new(env!("CARGO_MANIFEST_DIR")).join("src");
    for file in &files {
        for line in file.content.lines() {
            let Some(rest) = line.trim().strip_prefix("#[path = \"") else {
                continue;
            };
            let Some(name) = rest.strip_suffix("\"]") else {
                continue;
            };
            assert!(src.join(name).is_file(), "{} names missing test file {name}", file.path.display());
        }
    }
}

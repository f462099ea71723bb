//! Hygiene — enforces coding standards at test time
//!
//! These tests scan the crate source tree for antipatterns. Each has a budget
//! (ideally zero) and the budget never grows. The browser boundary is checked
//! too: only `browser.rs` may talk to `web_sys`, everything else goes through
//! the port traits so it stays testable without a browser.
#![allow(clippy::absurd_extreme_comparisons)]

use std::fs;
use std::path::Path;

struct SourceFile {
    path: String,
    content: String,
}

/// Production `.rs` files under `src/`, excluding `*_test.rs`.
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
        } else if path.extension().is_some_and(|e| e == "rs") {
            let path_str = path.to_string_lossy().to_string();
            if path_str.ends_with("_test.rs") {
                continue;
            }
            if let Ok(content) = fs::read_to_string(&path) {
                out.push(SourceFile { path: path_str, content });
            }
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

fn assert_budget(files: &[SourceFile], pattern: &str, max: usize) {
    let found = hits(files, pattern);
    let count: usize = found.iter().map(|(_, c)| c).sum();
    let listing = found
        .iter()
        .map(|(path, c)| format!("  {path}: {c}"))
        .collect::<Vec<_>>()
        .join("\n");
    assert!(count <= max, "`{pattern}` budget exceeded: found {count}, max {max}.\n{listing}");
}

// Panics — a theme script must never take the page down.
#[test]
fn panic_budgets() {
    let files = source_files();
    for pattern in [".unwrap()", ".expect(", "panic!(", "unreachable!(", "todo!(", "unimplemented!("] {
        assert_budget(&files, pattern, 0);
    }
}

// Silent loss — storage and DOM failures are logged, not discarded.
#[test]
fn silent_discard_budgets() {
    let files = source_files();
    assert_budget(&files, "let _ =", 0);
    assert_budget(&files, ".ok()", 0);
}

#[test]
fn allow_dead_code_budget() {
    assert_budget(&source_files(), "#[allow(dead_code)]", 0);
}

#[test]
fn web_sys_stays_in_browser_module() {
    let files: Vec<SourceFile> = source_files()
        .into_iter()
        .filter(|file| !file.path.ends_with("browser.rs"))
        .collect();
    assert!(!files.is_empty(), "no source files found under src/");
    assert_budget(&files, "web_sys", 0);
    assert_budget(&files, "wasm_bindgen", 0);
}

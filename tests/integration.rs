use indoc::indoc;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn audit_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("wiki-audit");
    path
}

fn write(root: &Path, rel: &str, content: &[u8]) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// A small wiki with one broken link, one link into an excluded file, one
/// orphan, three excluded files and one file that is not valid UTF-8.
fn setup_test_env() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let docs = tmp.path().join("docs");

    write(
        &docs,
        "index.md",
        indoc! {"
            ---
            title: Tianjiyao Wiki Home Page
            description: Entry point to the wiki covering bazi, ziwei and the theory behind them.
            keywords: [bazi, ziwei, wiki]
            breadcrumbs: [Home]
            ---
            # Welcome

            Start with [bazi](bazi/index.md) or [the stars](ziwei/stars.md).
            External reading: [source](https://example.com/book).
        "}
        .as_bytes(),
    );
    write(
        &docs,
        "bazi/index.md",
        indoc! {"
            ---
            title: Bazi
            ---
            # Bazi

            [Home](../index.md) · [Introduction](./intro.md) · [Coming soon](./missing.md)
        "}
        .as_bytes(),
    );
    write(
        &docs,
        "bazi/intro.md",
        b"# Introduction\n\n[Back](./index.md) and [template](../_template.md)\n",
    );
    write(
        &docs,
        "ziwei/stars.md",
        b"## Stars\n\nCompare with [bazi](../bazi/intro.md).\n",
    );
    write(
        &docs,
        "notes/lonely.md",
        b"# Lonely\n\n[myself](./lonely.md)\n",
    );

    // Excluded by name rules
    write(&docs, "README.md", b"# Readme\n");
    write(&docs, "_template.md", b"# Template\n");
    write(&docs, "bazi/intro.backup.1.md", b"# Old intro\n");
    // Not Markdown
    write(&docs, "assets/notes.txt", b"plain text\n");
    // Unreadable as UTF-8
    write(&docs, "broken.md", &[0x23, 0x20, 0xff, 0xfe, 0x0a]);

    (tmp, docs)
}

fn run_audit(args: &[&str]) -> (String, String, bool) {
    let binary = audit_binary();
    let output = Command::new(&binary)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap_or_else(|e| panic!("Failed to run wiki-audit binary at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();
    (stdout, stderr, success)
}

fn run_json(args: &[&str]) -> serde_json::Value {
    let mut full: Vec<&str> = args.to_vec();
    full.extend(["--format", "json"]);
    let (stdout, stderr, success) = run_audit(&full);
    assert!(success, "run failed: stdout={}, stderr={}", stdout, stderr);
    serde_json::from_str(&stdout)
        .unwrap_or_else(|e| panic!("stdout is not JSON ({}): {}", e, stdout))
}

#[test]
fn test_report_succeeds_despite_findings() {
    let (_tmp, docs) = setup_test_env();
    let (stdout, stderr, success) = run_audit(&["report", docs.to_str().unwrap()]);
    assert!(success, "report failed: stdout={}, stderr={}", stdout, stderr);

    assert!(stdout.contains("Documents:   5"), "stdout: {}", stdout);
    assert!(stdout.contains("\nStatistics\n"));
    assert!(stdout.contains("\nQuality\n"));
    assert!(stdout.contains("\nSEO\n"));
    assert!(stdout.contains("\nLinks\n"));
    assert!(!stdout.contains("\nStyle\n"));

    assert!(stdout.contains("bazi/index.md -> ./missing.md (resolved bazi/missing.md)"));
    assert!(stdout.contains("bazi/intro.md -> ../_template.md (resolved _template.md)"));
    assert!(stdout.contains("Orphan documents (1):"));
    assert!(stdout.contains("    notes/lonely.md"));
    assert!(stdout.contains("  Most linked documents:"));
    assert!(stdout.contains("       2  bazi/index.md"));
}

#[test]
fn test_excluded_and_unreadable_files() {
    let (_tmp, docs) = setup_test_env();
    let report = run_json(&["report", docs.to_str().unwrap()]);

    assert_eq!(report["documents"], 5);
    let warnings = report["warnings"].as_array().unwrap();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0]["path"], "broken.md");

    let dirs: Vec<&str> = report["stats"]["by_directory"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["directory"].as_str().unwrap())
        .collect();
    assert_eq!(dirs, vec!["bazi", ".", "notes", "ziwei"]);
}

#[test]
fn test_links_json() {
    let (_tmp, docs) = setup_test_env();
    let report = run_json(&["links", docs.to_str().unwrap()]);

    let structure = &report["structure"];
    assert_eq!(structure["internal_links"], 9);
    assert_eq!(structure["external_links"], 1);

    let broken = structure["broken_links"].as_array().unwrap();
    assert_eq!(broken.len(), 2);
    assert_eq!(broken[0]["source"], "bazi/index.md");
    assert_eq!(broken[0]["resolved"], "bazi/missing.md");
    assert_eq!(broken[1]["resolved"], "_template.md");

    assert_eq!(structure["orphans"], serde_json::json!(["notes/lonely.md"]));

    let ranked: Vec<(&str, u64)> = structure["most_linked"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| (d["path"].as_str().unwrap(), d["incoming"].as_u64().unwrap()))
        .collect();
    assert_eq!(
        ranked,
        vec![
            ("bazi/index.md", 2),
            ("bazi/intro.md", 2),
            ("index.md", 1),
            ("ziwei/stars.md", 1)
        ]
    );
    assert!(report.get("quality").is_none());
}

#[test]
fn test_quality_flags_are_independent() {
    let (_tmp, docs) = setup_test_env();
    let report = run_json(&["quality", docs.to_str().unwrap()]);

    let flagged = report["quality"]["flagged"].as_array().unwrap();
    let bazi_index = flagged
        .iter()
        .find(|d| d["path"] == "bazi/index.md")
        .expect("bazi/index.md flagged");
    let flags: Vec<&str> = bazi_index["flags"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f.as_str().unwrap())
        .collect();
    assert!(flags.contains(&"missing_description"));
    assert!(!flags.contains(&"missing_title"));
    assert!(!flags.contains(&"missing_front_matter"));
}

#[test]
fn test_missing_root_fails() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("does-not-exist");
    let (stdout, stderr, success) = run_audit(&["report", missing.to_str().unwrap()]);
    assert!(!success, "expected failure, stdout={}", stdout);
    assert!(stderr.contains("does-not-exist"), "stderr: {}", stderr);
}

#[test]
fn test_config_thresholds_and_limit() {
    let (tmp, docs) = setup_test_env();
    let config_path = tmp.path().join("wiki-audit.toml");
    fs::write(
        &config_path,
        indoc! {r#"
            [thresholds]
            entry_document = "notes/lonely.md"

            [report]
            list_limit = 1
        "#},
    )
    .unwrap();

    let (stdout, stderr, success) = run_audit(&[
        "--config",
        config_path.to_str().unwrap(),
        "links",
        docs.to_str().unwrap(),
    ]);
    assert!(success, "links failed: stdout={}, stderr={}", stdout, stderr);
    // The only document without incoming links is now the entry document.
    assert!(stdout.contains("No orphan documents."));
    assert!(stdout.contains("Broken links (2):"));
    assert!(stdout.contains("... and 1 more broken links"));
}

#[test]
fn test_invalid_config_fails() {
    let (tmp, docs) = setup_test_env();
    let config_path = tmp.path().join("bad.toml");
    fs::write(&config_path, "[thresholds]\ntitle_length = [60, 10]\n").unwrap();

    let (_, stderr, success) = run_audit(&[
        "--config",
        config_path.to_str().unwrap(),
        "report",
        docs.to_str().unwrap(),
    ]);
    assert!(!success);
    assert!(stderr.contains("title_length"), "stderr: {}", stderr);
}

#[test]
fn test_style_command() {
    let (_tmp, docs) = setup_test_env();
    write(
        &docs,
        "bazi/cliche.md",
        "# 十神\n\n众所周知，十神很重要。综上所述，值得学习。\n".as_bytes(),
    );

    let report = run_json(&["style", docs.to_str().unwrap()]);
    let style = &report["style"];
    let flagged = style["flagged"].as_array().unwrap();
    assert_eq!(flagged.len(), 1);
    assert_eq!(flagged[0]["path"], "bazi/cliche.md");
    assert_eq!(style["total_findings"], 2);
}

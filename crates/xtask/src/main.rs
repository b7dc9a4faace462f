use anyhow::Context;
use regex_lite::Regex;
use serde::Deserialize;
use std::path::{Path, PathBuf};

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        Some("arch-check") => arch_check(),
        Some(cmd) => anyhow::bail!("Unknown xtask command: {cmd}"),
        None => anyhow::bail!("Usage: cargo xtask <command>\n\nCommands:\n  arch-check"),
    }
}

#[derive(Debug, Deserialize)]
struct Metadata {
    packages: Vec<Package>,
}

#[derive(Debug, Deserialize)]
struct Package {
    name: String,
    targets: Vec<Target>,
}

#[derive(Debug, Deserialize)]
struct Target {
    kind: Vec<String>,
    src_path: PathBuf,
}

#[derive(Debug, PartialEq, Eq)]
struct Violation {
    line: usize,
    text: String,
}

/// Library code must propagate errors instead of panicking on them.
fn arch_check() -> anyhow::Result<()> {
    let output = std::process::Command::new("cargo")
        .args(["metadata", "--format-version", "1", "--no-deps"])
        .output()
        .context("running cargo metadata")?;

    if !output.status.success() {
        anyhow::bail!("cargo metadata failed")
    }

    let metadata: Metadata =
        serde_json::from_slice(&output.stdout).context("parsing cargo metadata output")?;
    let pattern = Regex::new(r"\.(unwrap|expect)\(").context("compiling unwrap pattern")?;

    let mut failures = 0;
    for package in &metadata.packages {
        for target in package.targets.iter().filter(|t| t.kind.iter().any(|k| k == "lib")) {
            let Some(src_dir) = target.src_path.parent() else {
                continue;
            };
            for file in rust_files(src_dir)? {
                let source = std::fs::read_to_string(&file)
                    .with_context(|| format!("reading {}", file.display()))?;
                for v in scan_source(&source, &pattern) {
                    eprintln!("{}: {}:{}: {}", package.name, file.display(), v.line, v.text);
                    failures += 1;
                }
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("arch-check found {failures} unwrap/expect call(s) in library code");
    }
    println!("arch-check passed");
    Ok(())
}

fn rust_files(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut pending = vec![dir.to_path_buf()];
    while let Some(current) = pending.pop() {
        let entries = std::fs::read_dir(&current)
            .with_context(|| format!("listing {}", current.display()))?;
        for entry in entries {
            let path = entry?.path();
            if path.is_dir() {
                pending.push(path);
            } else if path.extension().is_some_and(|ext| ext == "rs") {
                files.push(path);
            }
        }
    }
    files.sort();
    Ok(files)
}

/// Lines calling unwrap/expect before the first `#[cfg(test)]`.
/// Comment lines (including doc examples) are skipped.
fn scan_source(source: &str, pattern: &Regex) -> Vec<Violation> {
    source
        .lines()
        .enumerate()
        .take_while(|(_, line)| line.trim() != "#[cfg(test)]")
        .filter(|(_, line)| !line.trim_start().starts_with("//"))
        .filter(|(_, line)| pattern.is_match(line))
        .map(|(i, line)| Violation {
            line: i + 1,
            text: line.trim().to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern() -> Regex {
        Regex::new(r"\.(unwrap|expect)\(").unwrap()
    }

    #[test]
    fn test_scan_flags_unwrap_and_expect() {
        let source = "fn a() {\n    x.unwrap();\n    y.expect(\"boom\");\n}\n";
        let found = scan_source(source, &pattern());
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].line, 2);
        assert_eq!(found[1].text, "y.expect(\"boom\");");
    }

    #[test]
    fn test_scan_ignores_fallbacks_comments_and_tests() {
        let source = "\
fn a() {
    x.unwrap_or_default();
    y.unwrap_or_else(|| 0);
}
/// let v = parse().unwrap();
#[cfg(test)]
mod tests {
    fn t() { z.unwrap(); }
}
";
        assert!(scan_source(source, &pattern()).is_empty());
    }
}

//! Keeps `tests/unit` mirroring `src` one file per module

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::io;
    use std::path::Path;

    const SRC: &str = "src";
    const UNIT: &str = "tests/unit";

    // Entry points and module declarations carry no logic of their own
    fn is_exempt(relative: &str) -> bool {
        let name = relative.rsplit('/').next().unwrap_or(relative);
        matches!(name, "main.rs" | "lib.rs" | "mod.rs")
    }

    fn relative_paths(root: &str) -> BTreeSet<String> {
        let root = Path::new(root);
        let mut paths = BTreeSet::new();
        if let Err(error) = collect(root, root, &mut paths) {
            assert!(!root.exists(), "Failed to scan {}: {error}", root.display());
        }
        paths
    }

    fn collect(dir: &Path, base: &Path, paths: &mut BTreeSet<String>) -> Result<(), io::Error> {
        if !dir.is_dir() {
            return Ok(());
        }

        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let relative = path
                .strip_prefix(base)
                .map_err(|error| io::Error::other(error.to_string()))?
                .to_string_lossy()
                .replace('\\', "/");

            if path.is_dir() {
                paths.insert(relative);
                collect(&path, base, paths)?;
            } else if path.extension().and_then(|ext| ext.to_str()) == Some("rs") {
                paths.insert(relative);
            }
        }
        Ok(())
    }

    fn report(title: &str, entries: &[String]) -> String {
        format!("{title}:\n{}", entries.join("\n"))
    }

    #[test]
    fn test_all_src_files_have_unit_tests() {
        let src = relative_paths(SRC);
        let unit = relative_paths(UNIT);

        let missing: Vec<String> = src
            .iter()
            .filter(|path| !is_exempt(path) && !unit.contains(*path))
            .map(|path| format!("  - src/{path} -> {UNIT}/{path}"))
            .collect();

        assert!(
            missing.is_empty(),
            "{}",
            report("Source files without a unit test counterpart", &missing)
        );
    }

    #[test]
    fn test_all_unit_tests_have_src_counterparts() {
        let src = relative_paths(SRC);
        let unit = relative_paths(UNIT);

        let orphaned: Vec<String> = unit
            .iter()
            .filter(|path| !path.ends_with("mod.rs") && !src.contains(*path))
            .map(|path| format!("  - {UNIT}/{path} -> src/{path} (missing)"))
            .collect();

        assert!(
            orphaned.is_empty(),
            "{}",
            report("Unit tests without a source counterpart", &orphaned)
        );
    }

    #[test]
    fn test_unit_files_are_declared() {
        let unit = relative_paths(UNIT);
        let mut undeclared = Vec::new();

        for path in unit.iter().filter(|path| path.ends_with(".rs") && !is_exempt(path)) {
            let (parent, file) = path.rsplit_once('/').unwrap_or(("", path.as_str()));
            let module = file.trim_end_matches(".rs");
            let declarations = if parent.is_empty() {
                format!("{UNIT}/main.rs")
            } else {
                format!("{UNIT}/{parent}/mod.rs")
            };

            let content = fs::read_to_string(&declarations).unwrap_or_default();
            let declared = content.lines().any(|line| {
                let line = line.trim();
                line == format!("mod {module};") || line == format!("pub mod {module};")
            });
            if !declared {
                undeclared.push(format!("  - {UNIT}/{path} (not declared in {declarations})"));
            }
        }

        assert!(
            undeclared.is_empty(),
            "{}",
            report("Unit test files the harness never compiles", &undeclared)
        );
    }

    #[test]
    fn test_all_test_files_contain_tests() {
        let tests = relative_paths("tests");

        let empty: Vec<String> = tests
            .iter()
            .filter(|path| path.ends_with(".rs") && !is_exempt(path))
            .filter(|path| {
                fs::read_to_string(Path::new("tests").join(path))
                    .map(|content| !content.contains("#[test]"))
                    .unwrap_or(true)
            })
            .map(|path| format!("  - tests/{path}"))
            .collect();

        assert!(
            empty.is_empty(),
            "{}",
            report("Test files without any #[test] function", &empty)
        );
    }
}

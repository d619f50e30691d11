//! Keeps the unit test tree in lockstep with the module tree under src

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::io;
    use std::path::{Path, PathBuf};

    const SRC: &str = "src";
    const UNIT: &str = "tests/unit";

    // Relative paths of every `.rs` file below `root`
    fn rust_files(root: &Path) -> io::Result<BTreeSet<PathBuf>> {
        let mut found = BTreeSet::new();
        let mut pending = vec![root.to_path_buf()];

        while let Some(dir) = pending.pop() {
            for entry in fs::read_dir(&dir)? {
                let path = entry?.path();
                if path.is_dir() {
                    pending.push(path);
                } else if path.extension().is_some_and(|ext| ext == "rs") {
                    let relative = path
                        .strip_prefix(root)
                        .map_err(|_| io::Error::other("path escaped its root"))?;
                    found.insert(relative.to_path_buf());
                }
            }
        }
        Ok(found)
    }

    // Names of `mod x;` / `pub mod x;` declarations in a module file
    fn declared_modules(file: &Path) -> io::Result<BTreeSet<String>> {
        let text = fs::read_to_string(file)?;
        Ok(text
            .lines()
            .filter_map(|line| {
                let line = line.trim();
                let rest = line
                    .strip_prefix("pub mod ")
                    .or_else(|| line.strip_prefix("mod "))?;
                rest.strip_suffix(';').map(str::to_string)
            })
            .collect())
    }

    fn is_module_file(path: &Path) -> bool {
        path.file_name().is_some_and(|name| name == "mod.rs")
    }

    fn is_entry_point(path: &Path) -> bool {
        path == Path::new("lib.rs") || path == Path::new("main.rs")
    }

    fn listing(paths: &[PathBuf]) -> String {
        paths
            .iter()
            .map(|path| format!("  - {}", path.display()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    // Tests every source module has a unit test file at the same relative path
    // Verified by deleting tests/unit/io/jobs.rs
    #[test]
    fn test_every_module_has_unit_tests() {
        let src = rust_files(Path::new(SRC)).unwrap_or_else(|e| unreachable!("{e}"));
        let unit = rust_files(Path::new(UNIT)).unwrap_or_else(|e| unreachable!("{e}"));

        let missing: Vec<PathBuf> = src
            .iter()
            .filter(|path| !is_module_file(path) && !is_entry_point(path))
            .filter(|path| !unit.contains(*path))
            .cloned()
            .collect();

        assert!(
            missing.is_empty(),
            "Source modules without tests/unit counterparts:\n{}",
            listing(&missing)
        );
    }

    // Tests no unit test file outlives the module it covers
    // Verified by adding tests/unit/io/stale.rs
    #[test]
    fn test_no_orphaned_unit_tests() {
        let src = rust_files(Path::new(SRC)).unwrap_or_else(|e| unreachable!("{e}"));
        let unit = rust_files(Path::new(UNIT)).unwrap_or_else(|e| unreachable!("{e}"));

        let orphaned: Vec<PathBuf> = unit
            .iter()
            .filter(|path| !is_module_file(path))
            .filter(|path| !src.contains(*path))
            .cloned()
            .collect();

        assert!(
            orphaned.is_empty(),
            "Unit test files with no matching source module:\n{}",
            listing(&orphaned)
        );
    }

    // Tests the unit harness declares the same areas and modules as the crate
    // Verified by dropping `pub mod jobs;` from tests/unit/io/mod.rs
    #[test]
    fn test_unit_harness_declares_every_module() {
        let src_root = Path::new(SRC);
        let unit_root = Path::new(UNIT);

        let areas = declared_modules(&src_root.join("lib.rs")).unwrap_or_else(|e| unreachable!("{e}"));
        let unit_areas =
            declared_modules(&unit_root.join("mod.rs")).unwrap_or_else(|e| unreachable!("{e}"));
        assert_eq!(unit_areas, areas, "tests/unit/mod.rs must declare every area in src/lib.rs");

        for area in &areas {
            let modules = declared_modules(&src_root.join(area).join("mod.rs"))
                .unwrap_or_else(|e| unreachable!("{e}"));
            let unit_modules = declared_modules(&unit_root.join(area).join("mod.rs"))
                .unwrap_or_else(|e| unreachable!("{e}"));

            assert_eq!(
                unit_modules, modules,
                "tests/unit/{area}/mod.rs must declare every module of src/{area}/mod.rs"
            );
        }
    }

    // Tests every non-harness file under tests/ defines at least one test
    // Verified by stripping the #[test] attributes from tests/puzzle.rs
    #[test]
    fn test_test_files_define_tests() {
        let tests_root = Path::new("tests");
        let files = rust_files(tests_root).unwrap_or_else(|e| unreachable!("{e}"));

        let empty: Vec<PathBuf> = files
            .into_iter()
            .filter(|path| !is_module_file(path))
            .filter(|path| {
                fs::read_to_string(tests_root.join(path))
                    .map(|text| !text.contains("#[test]"))
                    .unwrap_or(true)
            })
            .collect();

        assert!(
            empty.is_empty(),
            "Test files without any #[test] function:\n{}",
            listing(&empty)
        );
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::io;
    use std::path::{Path, PathBuf};

    const SRC: &str = "src";
    const UNIT: &str = "tests/unit";

    /// Paths of every `.rs` file under `root`, relative to it
    fn rust_files(root: &Path) -> io::Result<BTreeSet<PathBuf>> {
        let mut files = BTreeSet::new();
        let mut pending = vec![root.to_path_buf()];
        while let Some(dir) = pending.pop() {
            for entry in fs::read_dir(&dir)? {
                let path = entry?.path();
                if path.is_dir() {
                    pending.push(path);
                } else if path.extension().is_some_and(|ext| ext == "rs") {
                    files.extend(path.strip_prefix(root).ok().map(Path::to_path_buf));
                }
            }
        }
        Ok(files)
    }

    fn listed(root: &str) -> BTreeSet<PathBuf> {
        let files = rust_files(Path::new(root));
        assert!(files.is_ok(), "cannot scan {root}: {files:?}");
        files.unwrap_or_default()
    }

    fn is_module_root(path: &Path) -> bool {
        matches!(
            path.file_name().and_then(|name| name.to_str()),
            Some("lib.rs" | "main.rs" | "mod.rs")
        )
    }

    /// Files holding code rather than module declarations
    fn leaves(root: &str) -> BTreeSet<PathBuf> {
        listed(root).into_iter().filter(|path| !is_module_root(path)).collect()
    }

    /// Names declared by `mod name;` or `pub mod name;` lines
    fn declared_modules(file: &Path) -> BTreeSet<String> {
        fs::read_to_string(file)
            .unwrap_or_default()
            .lines()
            .map(str::trim)
            .filter_map(|line| line.strip_prefix("pub mod ").or_else(|| line.strip_prefix("mod ")))
            .filter_map(|rest| rest.strip_suffix(';'))
            .map(str::to_string)
            .collect()
    }

    /// Module file expected to declare `path`, and the name it is declared under
    fn declaration_site(root: &Path, crate_root: &str, path: &Path) -> Option<(PathBuf, String)> {
        let module = if path.ends_with("mod.rs") {
            path.parent()?.to_path_buf()
        } else {
            path.with_extension("")
        };
        let name = module.file_name()?.to_str()?.to_string();
        let parent = module.parent()?;
        let site = if parent.as_os_str().is_empty() {
            root.join(crate_root)
        } else {
            root.join(parent).join("mod.rs")
        };
        Some((site, name))
    }

    fn undeclared(root: &str, crate_root: &str) -> Vec<String> {
        let base = Path::new(root);
        listed(root)
            .iter()
            .filter(|path| path.as_path() != Path::new(crate_root))
            .filter(|path| {
                declaration_site(base, crate_root, path)
                    .is_none_or(|(site, name)| !declared_modules(&site).contains(&name))
            })
            .map(|path| format!("  - {}", base.join(path).display()))
            .collect()
    }

    fn report(paths: &BTreeSet<&PathBuf>, prefix: &str) -> String {
        paths
            .iter()
            .map(|path| format!("  - {prefix}/{}", path.display()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    // Tests every source module has a unit test file at the same relative path and vice versa
    #[test]
    fn test_unit_tree_mirrors_src() {
        let sources = leaves(SRC);
        let units = leaves(UNIT);
        assert!(!sources.is_empty());

        let missing: BTreeSet<&PathBuf> = sources.difference(&units).collect();
        assert!(
            missing.is_empty(),
            "Source modules without a tests/unit counterpart:\n{}",
            report(&missing, SRC)
        );

        let orphaned: BTreeSet<&PathBuf> = units.difference(&sources).collect();
        assert!(
            orphaned.is_empty(),
            "Unit test files with no source module:\n{}",
            report(&orphaned, UNIT)
        );
    }

    // Tests no file sits outside the module tree, where it would silently never compile
    #[test]
    fn test_modules_are_declared() {
        let mut stray = undeclared(SRC, "lib.rs");
        stray.extend(undeclared(UNIT, "main.rs"));
        assert!(
            stray.is_empty(),
            "Files not declared by their parent module:\n{}",
            stray.join("\n")
        );
    }

    // Tests unit files wrap a test module and top-level suites define tests
    #[test]
    fn test_test_files_contain_tests() {
        let unit_files = leaves(UNIT).into_iter().map(|path| Path::new(UNIT).join(path));
        let suites = listed("tests")
            .into_iter()
            .filter(|path| path.components().count() == 1)
            .map(|path| Path::new("tests").join(path));

        let empty: Vec<String> = unit_files
            .map(|path| (path, "#[cfg(test)]"))
            .chain(suites.map(|path| (path, "#[test]")))
            .filter(|(path, marker)| {
                let content = fs::read_to_string(path).unwrap_or_default();
                !(content.contains(marker) && content.contains("#[test]"))
            })
            .map(|(path, _)| format!("  - {}", path.display()))
            .collect();

        assert!(
            empty.is_empty(),
            "Test files without #[test] functions:\n{}",
            empty.join("\n")
        );
    }
}

use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use colored::Colorize;
use glob::{Pattern, glob};
use walkdir::WalkDir;

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal directory paths.
pub(crate) fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Result of scanning files.
pub struct ScanResult {
    /// Java sources, sorted and deduplicated.
    pub files: BTreeSet<String>,
    pub skipped_count: usize,
}

pub fn scan_files(
    base_dir: &str,
    includes: &[String],
    ignore_patterns: &[String],
    verbose: bool,
) -> ScanResult {
    let mut files = BTreeSet::new();
    let mut skipped_count = 0;

    let mut literal_ignore_paths: Vec<PathBuf> = Vec::new();
    let mut glob_patterns: Vec<Pattern> = Vec::new();

    for p in ignore_patterns {
        if is_glob_pattern(p) {
            match Pattern::new(p) {
                Ok(pattern) => glob_patterns.push(pattern),
                Err(e) => {
                    if verbose {
                        eprintln!(
                            "{} Invalid ignore pattern '{}': {}",
                            "warning:".bold().yellow(),
                            p,
                            e
                        );
                    }
                }
            }
        } else {
            literal_ignore_paths.push(Path::new(base_dir).join(p));
        }
    }

    for dir in include_dirs(base_dir, includes, verbose) {
        for entry in WalkDir::new(dir) {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    skipped_count += 1;
                    if verbose {
                        eprintln!("{} Cannot access path: {}", "warning:".bold().yellow(), e);
                    }
                    continue;
                }
            };
            let path = entry.path();
            let path_str = path.to_string_lossy();

            if literal_ignore_paths
                .iter()
                .any(|ignore_path| path.starts_with(ignore_path))
            {
                continue;
            }
            if glob_patterns.iter().any(|p| p.matches(&path_str)) {
                continue;
            }

            if path.is_file() && is_java_file(path) {
                files.insert(path_str.into_owned());
            }
        }
    }

    ScanResult {
        files,
        skipped_count,
    }
}

/// Directories to walk: the base directory itself when `includes` is empty.
fn include_dirs(base_dir: &str, includes: &[String], verbose: bool) -> Vec<PathBuf> {
    if includes.is_empty() {
        return vec![Path::new(base_dir).to_path_buf()];
    }

    let mut paths = Vec::new();
    for inc in includes {
        if is_glob_pattern(inc) {
            let full_pattern = Path::new(base_dir).join(inc);
            match glob(&full_pattern.to_string_lossy()) {
                Ok(entries) => paths.extend(entries.flatten().filter(|entry| entry.is_dir())),
                Err(e) => {
                    if verbose {
                        eprintln!(
                            "{} Invalid glob pattern '{}': {}",
                            "warning:".bold().yellow(),
                            inc,
                            e
                        );
                    }
                }
            }
        } else {
            let path = Path::new(base_dir).join(inc);
            if path.exists() {
                paths.push(path);
            } else if verbose {
                eprintln!(
                    "{} Include path does not exist: {}",
                    "warning:".bold().yellow(),
                    path.display()
                );
            }
        }
    }
    paths
}

fn is_java_file(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("java")
}

#[cfg(test)]
mod tests {
    use std::fs::{self, File};

    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;

    fn names(result: &ScanResult, base: &Path) -> Vec<String> {
        result
            .files
            .iter()
            .map(|f| {
                Path::new(f)
                    .strip_prefix(base)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[test]
    fn test_scan_java_files_only() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        File::create(dir_path.join("FooTest.java")).unwrap();
        File::create(dir_path.join("Input.txt")).unwrap();
        File::create(dir_path.join("Foo.class")).unwrap();

        let result = scan_files(dir_path.to_str().unwrap(), &[], &[], false);

        assert_eq!(names(&result, dir_path), vec!["FooTest.java"]);
        assert_eq!(result.skipped_count, 0);
    }

    #[test]
    fn test_scan_results_are_sorted() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        let nested = dir_path.join("b").join("c");
        fs::create_dir_all(&nested).unwrap();
        File::create(nested.join("CTest.java")).unwrap();
        File::create(dir_path.join("b").join("BTest.java")).unwrap();
        File::create(dir_path.join("ATest.java")).unwrap();

        let result = scan_files(dir_path.to_str().unwrap(), &[], &[], false);

        assert_eq!(
            names(&result, dir_path),
            vec!["ATest.java", "b/BTest.java", "b/c/CTest.java"]
        );
    }

    #[test]
    fn test_scan_with_includes() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        let tests = dir_path.join("src").join("test").join("java");
        fs::create_dir_all(&tests).unwrap();
        File::create(tests.join("FooTest.java")).unwrap();

        let main = dir_path.join("src").join("main").join("java");
        fs::create_dir_all(&main).unwrap();
        File::create(main.join("Foo.java")).unwrap();

        let result = scan_files(
            dir_path.to_str().unwrap(),
            &["src/test/java".to_owned()],
            &[],
            false,
        );

        assert_eq!(names(&result, dir_path), vec!["src/test/java/FooTest.java"]);
    }

    #[test]
    fn test_scan_with_nonexistent_include() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        let src = dir_path.join("src");
        fs::create_dir(&src).unwrap();
        File::create(src.join("FooTest.java")).unwrap();

        let result = scan_files(
            dir_path.to_str().unwrap(),
            &["src".to_owned(), "nonexistent".to_owned()],
            &[],
            false,
        );

        assert_eq!(result.files.len(), 1);
    }

    #[test]
    fn test_scan_deduplicates_overlapping_includes() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        let checks = dir_path.join("src").join("checks");
        fs::create_dir_all(&checks).unwrap();
        File::create(checks.join("FooCheckTest.java")).unwrap();

        let result = scan_files(
            dir_path.to_str().unwrap(),
            &["src".to_owned(), "src/checks".to_owned()],
            &[],
            false,
        );

        assert_eq!(result.files.len(), 1);
    }

    #[test]
    fn test_scan_with_glob_include() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        for module in ["core", "extras"] {
            let tests = dir_path.join(module).join("test");
            fs::create_dir_all(&tests).unwrap();
            File::create(tests.join(format!("{module}Test.java"))).unwrap();
        }
        File::create(dir_path.join("RootTest.java")).unwrap();

        let result = scan_files(dir_path.to_str().unwrap(), &["*/test".to_owned()], &[], false);

        assert_eq!(
            names(&result, dir_path),
            vec!["core/test/coreTest.java", "extras/test/extrasTest.java"]
        );
    }

    #[test]
    fn test_scan_ignores_mixed_patterns() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        let checks = dir_path.join("src").join("checks");
        fs::create_dir_all(&checks).unwrap();
        File::create(checks.join("FooCheckTest.java")).unwrap();
        File::create(checks.join("FooCheckGenerated.java")).unwrap();

        let resources = dir_path.join("src").join("resources");
        fs::create_dir_all(&resources).unwrap();
        File::create(resources.join("InputFoo.java")).unwrap();

        let result = scan_files(
            dir_path.to_str().unwrap(),
            &["src".to_owned()],
            &[
                "src/resources".to_owned(),      // literal path
                "**/*Generated.java".to_owned(), // glob pattern
            ],
            false,
        );

        assert_eq!(names(&result, dir_path), vec!["src/checks/FooCheckTest.java"]);
    }

    #[test]
    fn test_is_glob_pattern() {
        assert!(is_glob_pattern("src/*"));
        assert!(is_glob_pattern("**/*Test.java"));
        assert!(is_glob_pattern("Foo?.java"));
        assert!(!is_glob_pattern("src/test/java"));
        assert!(!is_glob_pattern("src/[generated]"));
    }

    #[test]
    fn test_is_java_file() {
        assert!(is_java_file(Path::new("FooTest.java")));
        assert!(!is_java_file(Path::new("Foo.class")));
        assert!(!is_java_file(Path::new("java")));
    }
}

//! # Inputers

use std::path::{Component, Path, PathBuf};

use globset::{GlobBuilder, GlobMatcher};
use walkdir::WalkDir;

use crate::errors::{CMResult, CorpusError};
use crate::pipeline::traits::{InputIter, InputSource, Inputer};

/// Opens each of a fixed list of files, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileInputer {
    paths: Vec<PathBuf>,
}

impl FileInputer {
    /// Build a new [`FileInputer`].
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        Self {
            paths: paths.into_iter().map(|p| p.as_ref().to_path_buf()).collect(),
        }
    }

    /// The paths, in input order.
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }
}

impl Inputer for FileInputer {
    fn inputs(&self) -> CMResult<InputIter<'_>> {
        Ok(Box::new(self.paths.iter().map(InputSource::open)))
    }
}

/// Opens every file matching a glob pattern, in sorted path order.
///
/// The directory tree is walked from the longest literal prefix
/// of the pattern; `*` does not cross path separators, `**` does.
#[derive(Debug, Clone)]
pub struct GlobInputer {
    root: PathBuf,
    matcher: GlobMatcher,
}

impl GlobInputer {
    /// Compile a glob pattern.
    pub fn new(pattern: &str) -> CMResult<Self> {
        let matcher = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .map_err(|e| CorpusError::Pattern(e.to_string()))?
            .compile_matcher();

        Ok(Self {
            root: literal_root(pattern),
            matcher,
        })
    }

    /// The matched paths, sorted.
    ///
    /// Walked anew on every call.
    pub fn paths(&self) -> CMResult<Vec<PathBuf>> {
        let root = if self.root.as_os_str().is_empty() {
            Path::new(".")
        } else {
            self.root.as_path()
        };

        let mut paths = Vec::new();
        for entry in WalkDir::new(root) {
            let entry = entry.map_err(|e| CorpusError::External(e.to_string()))?;
            if !entry.file_type().is_file() {
                continue;
            }

            let path = if self.root.as_os_str().is_empty() {
                entry.path().strip_prefix(".").unwrap_or(entry.path())
            } else {
                entry.path()
            };
            if self.matcher.is_match(path) {
                paths.push(path.to_path_buf());
            }
        }
        paths.sort();
        Ok(paths)
    }
}

impl Inputer for GlobInputer {
    fn inputs(&self) -> CMResult<InputIter<'_>> {
        Ok(Box::new(self.paths()?.into_iter().map(InputSource::open)))
    }
}

/// The leading path components of `pattern` which hold no glob syntax.
fn literal_root(pattern: &str) -> PathBuf {
    let is_literal = |c: &Component| {
        !c.as_os_str()
            .to_string_lossy()
            .contains(['*', '?', '[', ']', '{', '}'])
    };
    Path::new(pattern)
        .components()
        .take_while(is_literal)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn names(inputer: &dyn Inputer) -> Vec<String> {
        inputer
            .inputs()
            .unwrap()
            .map(|s| s.unwrap().name)
            .collect()
    }

    #[test]
    fn test_literal_root() {
        assert_eq!(literal_root("data/news/*.txt"), PathBuf::from("data/news"));
        assert_eq!(literal_root("data/**/a?.txt"), PathBuf::from("data"));
        assert_eq!(literal_root("*.txt"), PathBuf::new());
        assert_eq!(literal_root("a/b.txt"), PathBuf::from("a/b.txt"));
    }

    #[test]
    fn test_file_inputer_order() {
        let dir = tempdir::TempDir::new("inputer_test").unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        fs::write(&a, "alpha").unwrap();
        fs::write(&b, "beta").unwrap();

        let inputer = FileInputer::new([&b, &a]);
        assert_eq!(
            names(&inputer),
            vec![
                b.to_string_lossy().to_string(),
                a.to_string_lossy().to_string()
            ]
        );

        let mut first = inputer.inputs().unwrap().next().unwrap().unwrap();
        assert_eq!(first.read_to_string().unwrap(), "beta");
    }

    #[test]
    fn test_file_inputer_missing_file() {
        let inputer = FileInputer::new(["/definitely/not/here.txt"]);
        let first = inputer.inputs().unwrap().next().unwrap();
        assert!(matches!(first, Err(CorpusError::Io(_))));
    }

    #[test]
    fn test_glob_inputer() {
        let dir = tempdir::TempDir::new("inputer_test").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("b.txt"), "b").unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        fs::write(dir.path().join("c.md"), "c").unwrap();
        fs::write(dir.path().join("sub").join("d.txt"), "d").unwrap();

        let root = dir.path().to_string_lossy().to_string();

        let flat = GlobInputer::new(&format!("{root}/*.txt")).unwrap();
        assert_eq!(
            flat.paths().unwrap(),
            vec![dir.path().join("a.txt"), dir.path().join("b.txt")]
        );
        assert_eq!(names(&flat).len(), 2);

        let deep = GlobInputer::new(&format!("{root}/**/*.txt")).unwrap();
        assert_eq!(deep.paths().unwrap().len(), 3);
    }

    #[test]
    fn test_glob_inputer_bad_pattern() {
        assert!(matches!(
            GlobInputer::new("data/[a"),
            Err(CorpusError::Pattern(_))
        ));
    }
}

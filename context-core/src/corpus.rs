use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

/// Supplies the ordered secret words; position `i` is the word of day `i`.
pub trait CorpusLoader: Send + Sync {
    fn words(&self) -> Result<Vec<String>>;
}

/// Reads an exported word sheet.
///
/// Cells are separated by tabs or commas and flattened row by row, so a
/// sheet laid out as a grid yields its words left to right, top to bottom.
/// Blank cells and lines starting with `#` are skipped.
#[derive(Debug, Clone)]
pub struct SheetFile {
    path: PathBuf,
}

impl SheetFile {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn parse(contents: &str) -> Vec<String> {
        contents
            .lines()
            .filter(|line| !line.trim_start().starts_with('#'))
            .flat_map(|line| line.split(['\t', ',']))
            .map(str::trim)
            .filter(|cell| !cell.is_empty())
            .map(str::to_string)
            .collect()
    }
}

impl CorpusLoader for SheetFile {
    fn words(&self) -> Result<Vec<String>> {
        let contents = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read word sheet {}", self.path.display()))?;
        let words = Self::parse(&contents);

        info!("Read {} words from {}", words.len(), self.path.display());
        Ok(words)
    }
}

/// A corpus held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticCorpus(pub Vec<String>);

impl StaticCorpus {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(words.into_iter().map(Into::into).collect())
    }
}

impl CorpusLoader for StaticCorpus {
    fn words(&self) -> Result<Vec<String>> {
        Ok(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flattens_rows() {
        let sheet = "سيارة\tبيت\nشجرة\tقلم\n";
        assert_eq!(SheetFile::parse(sheet), vec!["سيارة", "بيت", "شجرة", "قلم"]);
    }

    #[test]
    fn test_parse_skips_comments_and_blank_cells() {
        let sheet = "# words for february\nسيارة,,بيت\n\n   \n\t\nشجرة , \n  # indented comment\n";
        assert_eq!(SheetFile::parse(sheet), vec!["سيارة", "بيت", "شجرة"]);
    }

    #[test]
    fn test_parse_empty() {
        assert!(SheetFile::parse("").is_empty());
    }

    #[test]
    fn test_static_corpus_keeps_order() {
        let corpus = StaticCorpus::new(["c", "a", "b"]);
        assert_eq!(corpus.words().unwrap(), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_missing_sheet_file() {
        let loader = SheetFile::new("/nonexistent/words.tsv");
        let result = loader.words();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Failed to read word sheet"));
    }
}

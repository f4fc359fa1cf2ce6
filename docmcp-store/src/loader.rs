use anyhow::{Context, Result, bail};
use glob::{Pattern, glob};
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

use crate::repository::DocumentStore;

/// ディレクトリ内のファイルでシード済みドキュメントの内容を上書きする
///
/// ファイル名がシードのIDと一致するものだけを読み込む。
/// それ以外のファイルと空のファイルはスキップするので、IDの集合は変わらない。
/// 上書きしたドキュメントの数を返す。
pub fn apply_directory_overrides(store: &mut DocumentStore, dir_path: &Path) -> Result<usize> {
    if !dir_path.is_dir() {
        bail!("Documents directory not found: {}", dir_path.display());
    }
    info!("Searching for document overrides in: {}", dir_path.display());

    let pattern = format!("{}/*", Pattern::escape(&dir_path.display().to_string()));
    let mut paths: Vec<PathBuf> = glob(&pattern)
        .context("Failed to read glob pattern")?
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                warn!("Skipping unreadable entry {:?}: {}", e.path(), e.error());
                None
            }
        })
        .filter(|path| path.is_file())
        .collect();
    paths.sort();

    let mut overridden = 0;
    for path in paths {
        let Some(id) = path.file_name().and_then(|name| name.to_str()) else {
            warn!("Skipping file with non UTF-8 name: {path:?}");
            continue;
        };

        if !store.contains(id) {
            warn!("Skipping file that does not match a known document: {path:?}");
            continue;
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {path:?}"))?;

        if content.trim().is_empty() {
            warn!("Skipping empty file: {path:?}");
            continue;
        }

        store.overwrite(id, content)?;
        overridden += 1;
    }

    info!("Overrode {overridden} document(s) from '{}'.", dir_path.display());
    Ok(overridden)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SEED_DOCUMENTS;
    use std::io::Write;

    struct ScratchDir(PathBuf);

    impl ScratchDir {
        fn new(name: &str) -> Self {
            let dir = std::env::temp_dir().join(format!("{name}-{}", std::process::id()));
            let _ = fs::remove_dir_all(&dir);
            fs::create_dir_all(&dir).unwrap();
            Self(dir)
        }

        fn write(&self, file: &str, content: &str) {
            let mut f = fs::File::create(self.0.join(file)).unwrap();
            f.write_all(content.as_bytes()).unwrap();
        }
    }

    impl Drop for ScratchDir {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.0);
        }
    }

    fn seeded_ids() -> Vec<String> {
        let mut ids: Vec<String> = SEED_DOCUMENTS.iter().map(|(id, _)| id.to_string()).collect();
        ids.sort();
        ids
    }

    #[test]
    fn test_overrides_replace_seeded_content_only() {
        let dir = ScratchDir::new("docmcp-overrides");
        dir.write("plan.md", "# Plan\n\nShip it.");
        dir.write("report.pdf", "Condenser tower report, revised.");
        dir.write("only.md", "not a seeded document");
        dir.write("spec.txt", "   \n");

        let mut store = DocumentStore::seeded();
        let overridden = apply_directory_overrides(&mut store, &dir.0).unwrap();

        assert_eq!(overridden, 2);
        assert_eq!(store.list_ids(), seeded_ids());
        assert_eq!(store.read("plan.md").unwrap(), "# Plan\n\nShip it.");
        assert_eq!(store.read("report.pdf").unwrap(), "Condenser tower report, revised.");
        assert!(store.read("only.md").is_err());
        assert_eq!(
            store.read("spec.txt").unwrap(),
            "These specifications define the technical requirements for the equipment."
        );
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let mut store = DocumentStore::seeded();
        let missing = std::env::temp_dir().join("docmcp-no-such-dir/typo-dir");
        let err = apply_directory_overrides(&mut store, &missing).unwrap_err();
        assert!(err.to_string().contains("typo-dir"));
    }

    #[test]
    fn test_file_path_is_not_a_directory() {
        let dir = ScratchDir::new("docmcp-not-a-dir");
        dir.write("plan.md", "x");
        let mut store = DocumentStore::seeded();
        assert!(apply_directory_overrides(&mut store, &dir.0.join("plan.md")).is_err());
    }

    #[test]
    fn test_directory_name_with_glob_metacharacters() {
        let dir = ScratchDir::new("docmcp-[meta]*");
        dir.write("plan.md", "escaped");

        let mut store = DocumentStore::seeded();
        assert_eq!(apply_directory_overrides(&mut store, &dir.0).unwrap(), 1);
        assert_eq!(store.read("plan.md").unwrap(), "escaped");
    }
}

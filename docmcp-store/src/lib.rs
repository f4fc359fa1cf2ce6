pub mod error;
pub mod loader;
pub mod model;
pub mod repository;

pub use error::{StoreError, StoreResult};
pub use model::{Document, EditOutcome};
pub use repository::{DocumentStore, SEED_DOCUMENTS};

use anyhow::Result;
use log::info;
use std::path::Path;

/// 起動時にストアを用意する
///
/// 常に組み込みの6件から構築し、`documents_dir` が指定されていれば
/// 同名ファイルの内容で上書きする。IDの集合はどちらの場合も同じ。
pub fn initialize_store(documents_dir: Option<&Path>) -> Result<DocumentStore> {
    let mut store = DocumentStore::seeded();
    if let Some(dir) = documents_dir {
        loader::apply_directory_overrides(&mut store, dir)?;
    }
    info!("Document store initialized with {} documents.", store.len());
    Ok(store)
}

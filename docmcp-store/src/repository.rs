use std::collections::BTreeMap;

use log::info;

use crate::error::{StoreError, StoreResult};
use crate::model::{Document, EditOutcome};

/// 起動時に投入される固定のドキュメント
pub const SEED_DOCUMENTS: [(&str, &str); 6] = [
    (
        "deposition.md",
        "This deposition covers the testimony of Angela Smith, P.E.",
    ),
    (
        "report.pdf",
        "The report details the state of a 20m condenser tower.",
    ),
    (
        "financials.docx",
        "These financials outline the project's budget and expenditures.",
    ),
    (
        "outlook.pdf",
        "This document presents the projected future performance of the system.",
    ),
    (
        "plan.md",
        "The plan outlines the steps for the project's implementation.",
    ),
    (
        "spec.txt",
        "These specifications define the technical requirements for the equipment.",
    ),
];

/// ドキュメントID → 内容 のインメモリストア
///
/// IDの集合は構築時に確定し、以後は内容だけが `edit` で書き換わる。
#[derive(Debug, Clone, Default)]
pub struct DocumentStore {
    documents: BTreeMap<String, Document>,
}

impl DocumentStore {
    pub fn from_documents(documents: impl IntoIterator<Item = Document>) -> Self {
        let documents = documents
            .into_iter()
            .map(|doc| (doc.id.clone(), doc))
            .collect();
        Self { documents }
    }

    pub fn seeded() -> Self {
        Self::from_documents(
            SEED_DOCUMENTS
                .iter()
                .map(|(id, content)| Document::new(*id, *content)),
        )
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn document(&self, doc_id: &str) -> StoreResult<&Document> {
        self.documents
            .get(doc_id)
            .ok_or_else(|| StoreError::NotFound {
                doc_id: doc_id.to_string(),
            })
    }

    pub fn read(&self, doc_id: &str) -> StoreResult<&str> {
        self.document(doc_id).map(|doc| doc.content.as_str())
    }

    /// テンプレートURI (`docs://documents/{doc_id}`) 経由の取得。中身は `read` と同じ
    pub fn get_by_id(&self, doc_id: &str) -> StoreResult<&str> {
        self.read(doc_id)
    }

    pub fn contains(&self, doc_id: &str) -> bool {
        self.documents.contains_key(doc_id)
    }

    pub fn documents(&self) -> impl Iterator<Item = &Document> {
        self.documents.values()
    }

    pub fn list_ids(&self) -> Vec<String> {
        self.documents.keys().cloned().collect()
    }

    /// 既存ドキュメントの内容を丸ごと差し替える（起動時の上書き用）
    ///
    /// IDを追加することはない。存在しないIDは `NotFound`。
    pub fn overwrite(&mut self, doc_id: &str, content: impl Into<String>) -> StoreResult<()> {
        let document = self
            .documents
            .get_mut(doc_id)
            .ok_or_else(|| StoreError::NotFound {
                doc_id: doc_id.to_string(),
            })?;
        document.content = content.into();
        Ok(())
    }

    /// `old_string` の出現箇所をすべて `new_string` に置き換える
    ///
    /// 検証はすべて書き換え前に行う。失敗時は内容を一切変更しない。
    pub fn edit(
        &mut self,
        doc_id: &str,
        old_string: &str,
        new_string: &str,
    ) -> StoreResult<EditOutcome> {
        let document = self
            .documents
            .get_mut(doc_id)
            .ok_or_else(|| StoreError::NotFound {
                doc_id: doc_id.to_string(),
            })?;

        if old_string.is_empty() {
            return Err(StoreError::EmptyOldString {
                doc_id: doc_id.to_string(),
            });
        }

        let replacements = document.content.matches(old_string).count();
        if replacements == 0 {
            return Err(StoreError::SubstringNotFound {
                doc_id: doc_id.to_string(),
                old_string: old_string.to_string(),
            });
        }

        document.content = document.content.replace(old_string, new_string);
        info!("Replaced {replacements} occurrence(s) in '{doc_id}'");

        Ok(EditOutcome {
            doc_id: doc_id.to_string(),
            old_string: old_string.to_string(),
            new_string: new_string.to_string(),
            replacements,
        })
    }
}

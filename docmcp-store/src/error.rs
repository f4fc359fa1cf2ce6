/// ドキュメントストア操作のエラー
///
/// どのエラーもストアを変更する前に検出されるため、
/// エラー時にドキュメントが中途半端に書き換わることはない。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("Document '{doc_id}' not found")]
    NotFound { doc_id: String },

    #[error("String '{old_string}' not found in document '{doc_id}'")]
    SubstringNotFound { doc_id: String, old_string: String },

    #[error("Cannot edit document '{doc_id}': the string to replace must not be empty")]
    EmptyOldString { doc_id: String },
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

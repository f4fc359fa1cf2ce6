//! リソースURIの組み立てと解析

/// ドキュメントID一覧を返す静的リソース
pub const DOCUMENTS_URI: &str = "docs://documents";

/// 個別ドキュメントを返すリソーステンプレート
pub const DOCUMENT_URI_TEMPLATE: &str = "docs://documents/{doc_id}";

const DOCUMENT_URI_PREFIX: &str = "docs://documents/";

/// 要求されたリソースの種類
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentResource<'a> {
    /// `docs://documents`
    List,
    /// `docs://documents/{doc_id}`
    Document(&'a str),
}

pub fn parse_uri(uri: &str) -> Option<DocumentResource<'_>> {
    if uri == DOCUMENTS_URI {
        return Some(DocumentResource::List);
    }
    match uri.strip_prefix(DOCUMENT_URI_PREFIX) {
        Some(doc_id) if !doc_id.is_empty() => Some(DocumentResource::Document(doc_id)),
        _ => None,
    }
}

pub fn document_uri(doc_id: &str) -> String {
    format!("{DOCUMENT_URI_PREFIX}{doc_id}")
}

//! ドキュメント管理MCPサーバー
//!
//! インメモリのドキュメントストアを Model Context Protocol で公開する。
//!
//! - ツール: `read_doc_contents`, `edit_document`
//! - リソース: `docs://documents`, `docs://documents/{doc_id}`
//! - プロンプト: `format`, `summarize`

pub mod prompts;
pub mod resources;
pub mod server;
pub mod transport;

pub use server::{DocumentServer, SERVER_NAME};
pub use transport::{bind_http, serve_http, serve_http_on, serve_stdio};

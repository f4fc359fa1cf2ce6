// 共有ストアのための参照カウンタ付きポインタ
use std::sync::Arc;

use docmcp_store::{Document, DocumentStore, StoreError};
// MCPサーバー実装に必要なもの一式
use rmcp::{
    ErrorData as McpError,
    RoleServer,
    ServerHandler,
    handler::server::{
        router::{prompt::PromptRouter, tool::ToolRouter},
        wrapper::Parameters,
    },
    model::*,
    prompt,
    prompt_handler,
    prompt_router,
    service::RequestContext,
    tool,
    tool_handler,
    tool_router,
};
use serde_json::json;
use tokio::sync::Mutex;

use crate::prompts;
use crate::resources::{self, DOCUMENT_URI_TEMPLATE, DOCUMENTS_URI, DocumentResource};

pub const SERVER_NAME: &str = "DocumentMCP";

/// ID一覧リソースのMIMEタイプ
const LIST_MIME_TYPE: &str = "application/json";

/// 一覧で広告したものと同じMIMEタイプを持つテキストコンテンツ
fn text_contents(text: impl Into<String>, uri: &str, mime: &str) -> ResourceContents {
    let mut contents = ResourceContents::text(text, uri);
    if let ResourceContents::TextResourceContents { mime_type, .. } = &mut contents {
        *mime_type = Some(mime.to_string());
    }
    contents
}

/// read_doc_contents ツールの引数
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct ReadDocRequest {
    /// The ID of the document to read
    pub doc_id: String,
}

/// edit_document ツールの引数
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct EditDocumentRequest {
    /// The ID of the document to edit
    pub doc_id: String,
    /// The string to find and replace
    pub old_string: String,
    /// The string to replace with
    pub new_string: String,
}

/// format プロンプトの引数
#[derive(Debug, serde::Serialize, serde::Deserialize, schemars::JsonSchema)]
pub struct FormatPromptArgs {
    /// The ID of the document to format
    pub doc_id: String,
}

/// summarize プロンプトの引数
#[derive(Debug, serde::Serialize, serde::Deserialize, schemars::JsonSchema)]
pub struct SummarizePromptArgs {
    /// The ID of the document to summarize
    pub doc_id: String,
}

/// ドキュメント管理MCPサーバー
///
/// 1. store: ドキュメントストア（全クローンで共有、編集はロック内で完結）
/// 2. tool_router: read_doc_contents / edit_document の振り分け
/// 3. prompt_router: format / summarize の振り分け
///
/// HTTPトランスポートではセッションごとにクローンされるが、
/// ストアは `Arc` 経由で同じものを指す。
#[derive(Clone)]
pub struct DocumentServer {
    store: Arc<Mutex<DocumentStore>>,
    tool_router: ToolRouter<DocumentServer>,
    prompt_router: PromptRouter<DocumentServer>,
}

/// ストアのエラーを `isError: true` のツール結果に変換する
///
/// 呼び出し側のLLMがメッセージを読んで対応できるよう、プロトコルエラーにはしない。
fn tool_error(err: StoreError) -> CallToolResult {
    tracing::warn!(error = %err, "ツール呼び出しが失敗しました");
    CallToolResult::error(vec![Content::text(err.to_string())])
}

#[tool_router]
impl DocumentServer {
    pub fn new(store: DocumentStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            tool_router: Self::tool_router(),
            prompt_router: Self::prompt_router(),
        }
    }

    #[tool(description = "Read the contents of a document by its ID.")]
    async fn read_doc_contents(
        &self,
        Parameters(ReadDocRequest { doc_id }): Parameters<ReadDocRequest>,
    ) -> Result<CallToolResult, McpError> {
        let store = self.store.lock().await;
        match store.read(&doc_id) {
            Ok(content) => {
                tracing::info!(%doc_id, "ドキュメントを読み取りました");
                Ok(CallToolResult::success(vec![Content::text(content)]))
            }
            Err(err) => Ok(tool_error(err)),
        }
    }

    #[tool(description = "Edit a document by finding and replacing a string.")]
    async fn edit_document(
        &self,
        Parameters(EditDocumentRequest {
            doc_id,
            old_string,
            new_string,
        }): Parameters<EditDocumentRequest>,
    ) -> Result<CallToolResult, McpError> {
        // 検索から置換までロックを保持したまま行う
        let mut store = self.store.lock().await;
        match store.edit(&doc_id, &old_string, &new_string) {
            Ok(outcome) => {
                tracing::info!(
                    %doc_id,
                    replacements = outcome.replacements,
                    "ドキュメントを編集しました"
                );
                Ok(CallToolResult::success(vec![Content::text(
                    outcome.message(),
                )]))
            }
            Err(err) => Ok(tool_error(err)),
        }
    }
}

#[prompt_router]
impl DocumentServer {
    #[prompt(name = "format", description = "Rewrite a document in markdown format.")]
    async fn format_document(
        &self,
        Parameters(FormatPromptArgs { doc_id }): Parameters<FormatPromptArgs>,
    ) -> Result<GetPromptResult, McpError> {
        Ok(GetPromptResult {
            description: Some(format!("Rewrite '{doc_id}' in markdown format")),
            messages: vec![PromptMessage::new_text(
                PromptMessageRole::User,
                prompts::format_prompt(&doc_id),
            )],
        })
    }

    #[prompt(name = "summarize", description = "Summarize a document concisely.")]
    async fn summarize_document(
        &self,
        Parameters(SummarizePromptArgs { doc_id }): Parameters<SummarizePromptArgs>,
    ) -> Result<GetPromptResult, McpError> {
        Ok(GetPromptResult {
            description: Some(format!("Summarize '{doc_id}' concisely")),
            messages: vec![PromptMessage::new_text(
                PromptMessageRole::User,
                prompts::summarize_prompt(&doc_id),
            )],
        })
    }
}

impl DocumentServer {
    /// 一覧リソースと、ドキュメントごとの具体的なリソース
    async fn document_resources(&self) -> Vec<Resource> {
        let store = self.store.lock().await;

        let mut list = RawResource::new(DOCUMENTS_URI, "list_documents".to_string());
        list.description = Some("Return a list of all document IDs.".to_string());
        list.mime_type = Some(LIST_MIME_TYPE.to_string());

        let mut listed = vec![list.no_annotation()];
        listed.extend(store.documents().map(|doc| {
            let mut raw = RawResource::new(resources::document_uri(&doc.id), doc.id.clone());
            raw.mime_type = Some(doc.mime_type().to_string());
            raw.no_annotation()
        }));
        listed
    }

    fn document_template() -> Result<ResourceTemplate, McpError> {
        serde_json::from_value(json!({
            "uriTemplate": DOCUMENT_URI_TEMPLATE,
            "name": "get_document",
            "description": "Return the contents of a specific document by ID.",
        }))
        .map_err(|e| McpError::internal_error(e.to_string(), None))
    }

    async fn read_document_resource(&self, uri: &str) -> Result<ReadResourceResult, McpError> {
        let store = self.store.lock().await;
        match resources::parse_uri(uri) {
            Some(DocumentResource::List) => {
                let ids = serde_json::to_string(&store.list_ids())
                    .map_err(|e| McpError::internal_error(e.to_string(), None))?;
                Ok(ReadResourceResult {
                    contents: vec![text_contents(ids, uri, LIST_MIME_TYPE)],
                })
            }
            Some(DocumentResource::Document(doc_id)) => match store.get_by_id(doc_id) {
                Ok(content) => Ok(ReadResourceResult {
                    contents: vec![text_contents(content, uri, Document::mime_type_for(doc_id))],
                }),
                Err(err) => Err(McpError::resource_not_found(
                    err.to_string(),
                    Some(json!({ "uri": uri })),
                )),
            },
            None => Err(McpError::resource_not_found(
                "resource_not_found",
                Some(json!({ "uri": uri })),
            )),
        }
    }
}

#[tool_handler]
#[prompt_handler]
impl ServerHandler for DocumentServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_prompts()
                .enable_resources()
                .enable_tools()
                .build(),
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Implementation::from_build_env()
            },
            instructions: Some(
                "This server manages an in-memory set of documents.\n\nTools:\n- read_doc_contents: read a document by ID\n- edit_document: replace every occurrence of a string in a document\n\nResources:\n- docs://documents: list of all document IDs\n- docs://documents/{doc_id}: contents of one document\n\nPrompts:\n- format: rewrite a document in markdown\n- summarize: summarize a document in 2-3 sentences".to_string(),
            ),
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        Ok(ListResourcesResult {
            resources: self.document_resources().await,
            next_cursor: None,
        })
    }

    async fn read_resource(
        &self,
        ReadResourceRequestParam { uri }: ReadResourceRequestParam,
        _: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        self.read_document_resource(&uri).await
    }

    async fn list_resource_templates(
        &self,
        _request: Option<PaginatedRequestParam>,
        _: RequestContext<RoleServer>,
    ) -> Result<ListResourceTemplatesResult, McpError> {
        Ok(ListResourceTemplatesResult {
            next_cursor: None,
            resource_templates: vec![Self::document_template()?],
        })
    }

    async fn initialize(
        &self,
        _request: InitializeRequestParam,
        context: RequestContext<RoleServer>,
    ) -> Result<InitializeResult, McpError> {
        // HTTP経由の場合はリクエスト情報をログに残す
        if let Some(http_request_part) = context.extensions.get::<axum::http::request::Parts>() {
            let initialize_headers = &http_request_part.headers;
            let initialize_uri = &http_request_part.uri;
            tracing::info!(?initialize_headers, %initialize_uri, "HTTPサーバーから初期化されました");
        }

        Ok(self.get_info())
    }
}

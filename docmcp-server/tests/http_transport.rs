//! Streamable HTTP トランスポート越しに複数セッションで同じストアを共有するテスト

use std::net::SocketAddr;

use anyhow::Result;
use docmcp_server::{DocumentServer, bind_http, serve_http_on};
use docmcp_store::DocumentStore;
use rmcp::{
    RoleClient, ServiceExt,
    model::CallToolRequestParam,
    service::RunningService,
    transport::StreamableHttpClientTransport,
};
use serde_json::{Value, json};
use tokio::sync::oneshot;

async fn session(addr: SocketAddr) -> Result<RunningService<RoleClient, ()>> {
    let transport = StreamableHttpClientTransport::from_uri(format!("http://{addr}/mcp"));
    Ok(().serve(transport).await?)
}

async fn call(
    client: &RunningService<RoleClient, ()>,
    name: &'static str,
    arguments: Value,
) -> Result<Value> {
    let result = client
        .call_tool(CallToolRequestParam {
            name: name.into(),
            arguments: arguments.as_object().cloned(),
        })
        .await?;
    Ok(serde_json::to_value(result)?)
}

#[tokio::test]
async fn test_edit_is_visible_from_another_session() -> Result<()> {
    let listener = bind_http("127.0.0.1:0".parse()?).await?;
    let addr = listener.local_addr()?;

    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let server = tokio::spawn(serve_http_on(
        DocumentServer::new(DocumentStore::seeded()),
        listener,
        async {
            let _ = stop_rx.await;
        },
    ));

    let editor = session(addr).await?;
    let reader = session(addr).await?;

    let edited = call(
        &editor,
        "edit_document",
        json!({ "doc_id": "plan.md", "old_string": "implementation", "new_string": "rollout" }),
    )
    .await?;
    assert_ne!(edited["isError"], true);

    let read = call(&reader, "read_doc_contents", json!({ "doc_id": "plan.md" })).await?;
    assert_eq!(
        read["content"][0]["text"],
        "The plan outlines the steps for the project's rollout."
    );

    editor.cancel().await?;
    reader.cancel().await?;

    let _ = stop_tx.send(());
    // セッションが残っていても止まるように
    server.abort();
    Ok(())
}

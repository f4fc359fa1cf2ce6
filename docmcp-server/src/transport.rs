use std::net::SocketAddr;

use anyhow::{Context, Result};
use rmcp::{
    ServiceExt,
    transport::{
        stdio,
        streamable_http_server::{StreamableHttpService, session::local::LocalSessionManager},
    },
};

use tokio::net::TcpListener;

use crate::server::DocumentServer;

/// 標準入出力でサーバーを起動し、クライアントが切断するまで待つ
pub async fn serve_stdio(server: DocumentServer) -> Result<()> {
    tracing::info!("stdioトランスポートでMCPサーバーを起動しています");

    let service = server.serve(stdio()).await.inspect_err(|e| {
        tracing::error!("サーバー実行中にエラーが発生しました: {:?}", e);
    })?;

    service.waiting().await?;
    Ok(())
}

/// HTTPトランスポート用のリスナーを確保する
///
/// ポート `0` を渡すとOSが空きポートを割り当てる。
pub async fn bind_http(bind_address: SocketAddr) -> Result<TcpListener> {
    TcpListener::bind(bind_address)
        .await
        .with_context(|| format!("Failed to bind {bind_address}"))
}

/// 確保済みのリスナーで Streamable HTTP サーバーを動かす（`/mcp` 配下）
///
/// セッションごとにサーバーをクローンするが、ストアは共有される。
/// `shutdown` が完了すると処理中のリクエストを待って停止する。
pub async fn serve_http_on<F>(server: DocumentServer, listener: TcpListener, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let service = StreamableHttpService::new(
        move || Ok(server.clone()),
        LocalSessionManager::default().into(),
        Default::default(),
    );
    let router = axum::Router::new().nest_service("/mcp", service);

    let local_addr = listener.local_addr().context("Failed to read local address")?;
    tracing::info!(%local_addr, "HTTPトランスポートでMCPサーバーを起動しました");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server error")?;
    Ok(())
}

/// 指定アドレスで Streamable HTTP サーバーを起動し、Ctrl-C で停止する
pub async fn serve_http(server: DocumentServer, bind_address: SocketAddr) -> Result<()> {
    let listener = bind_http(bind_address).await?;
    serve_http_on(server, listener, async {
        let _ = tokio::signal::ctrl_c().await;
        tracing::info!("シャットダウンします");
    })
    .await
}

use anyhow::{Context, Result, bail};
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transport {
    Stdio,
    Http { bind_address: SocketAddr },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub transport: Transport,
    pub documents_dir: Option<PathBuf>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 環境変数の取得方法を差し替えられるようにしたもの（テスト用）
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let transport = lookup("DOCMCP_TRANSPORT").unwrap_or_else(|| "stdio".to_string());
        let transport = match transport.trim().to_ascii_lowercase().as_str() {
            "stdio" => Transport::Stdio,
            "http" => {
                let bind_address = lookup("DOCMCP_BIND_ADDRESS")
                    .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());
                let bind_address = bind_address
                    .parse()
                    .with_context(|| format!("Invalid DOCMCP_BIND_ADDRESS: {bind_address}"))?;
                Transport::Http { bind_address }
            }
            other => bail!("Unknown DOCMCP_TRANSPORT '{other}' (expected 'stdio' or 'http')"),
        };

        let documents_dir = lookup("DOCUMENTS_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            transport,
            documents_dir,
        })
    }
}

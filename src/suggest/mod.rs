//! ファイル名提案モジュール - Chat Completions API クライアント

mod client;

use anyhow::Result;
use async_trait::async_trait;

pub use client::SuggestClient;

/// ファイル名提案のインターフェース
///
/// 実装側がトランスポートとプロバイダ固有の詳細を隠蔽する。
#[async_trait]
pub trait Suggester: Send + Sync {
    /// 抽出テキストを渡し、提案されたファイル名を返す
    async fn suggest_filename(&self, text: &str) -> Result<String>;
}

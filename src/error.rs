//! エラー型定義

use thiserror::Error;

/// リネーム処理のエラー
///
/// 各段階の失敗はこの4種類に分類され、リトライせずステータス表示で通知する。
#[derive(Debug, Error)]
pub enum RenameError {
    /// ユーザーがダイアログをキャンセルした
    #[error("キャンセルされました")]
    Cancelled,

    /// PDFからテキストを抽出できなかった
    #[error("テキスト抽出に失敗: {0}")]
    ExtractionFailed(String),

    /// ファイル名の提案に失敗（ネットワークエラー、HTTPステータス、レスポンス形式）
    #[error("ファイル名の生成に失敗: {0}")]
    SuggestionFailed(String),

    /// ファイルの移動に失敗
    #[error("ファイルの移動に失敗: {0}")]
    MoveFailed(String),
}

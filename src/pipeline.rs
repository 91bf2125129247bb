//! パイプライン制御 - テキスト抽出からファイル名提案まで

use crate::error::RenameError;
use crate::naming;
use crate::pdf;
use crate::suggest::Suggester;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use tracing::info;

/// パイプラインからUIへ送られるイベント
pub enum PipelineEvent {
    /// 処理中のステータス更新
    Progress(String),
    /// ファイル名の提案が完了（移動先の選択待ち）
    Suggested { original: PathBuf, name: String },
    /// 処理失敗
    Failed(RenameError),
}

/// テキスト抽出からファイル名提案までをバックグラウンドで実行
///
/// 結果はチャンネル経由でUIスレッドへ送る。移動先の選択とファイル移動は
/// ダイアログを伴うためUIスレッド側で行う。
pub async fn extract_and_suggest(
    original: PathBuf,
    suggester: Arc<dyn Suggester>,
    tx: Sender<PipelineEvent>,
) {
    // テキスト抽出
    let text = match pdf::extract_text(&original) {
        Ok(text) => text,
        Err(e) => {
            let _ = tx.send(PipelineEvent::Failed(RenameError::ExtractionFailed(
                e.to_string(),
            )));
            return;
        }
    };
    info!("テキスト抽出完了: {} 文字", text.chars().count());

    let _ = tx.send(PipelineEvent::Progress("ファイル名を生成中...".to_string()));

    // ファイル名の提案とサニタイズ
    match suggest_name(&text, &original, suggester.as_ref()).await {
        Ok(name) => {
            info!("提案されたファイル名: {}", name);
            let _ = tx.send(PipelineEvent::Suggested { original, name });
        }
        Err(e) => {
            let _ = tx.send(PipelineEvent::Failed(e));
        }
    }
}

/// 抽出テキストからサニタイズ済みのファイル名を得る
///
/// サニタイズで空になった場合は元のファイル名から代替名を作る。
pub async fn suggest_name(
    text: &str,
    original: &Path,
    suggester: &dyn Suggester,
) -> Result<String, RenameError> {
    let suggested = suggester
        .suggest_filename(text)
        .await
        .map_err(|e| RenameError::SuggestionFailed(e.to_string()))?;

    let name = naming::sanitize_filename(&suggested);
    if name.is_empty() {
        return Ok(naming::fallback_filename(original));
    }

    Ok(name)
}

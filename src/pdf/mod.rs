//! PDF処理モジュール - PDFからのテキスト抽出

use anyhow::{Context, Result};
use std::path::Path;

/// PDFファイルからテキストを抽出
///
/// 抽出結果が空白のみの場合もエラーとして扱う。
pub fn extract_text(pdf_path: impl AsRef<Path>) -> Result<String> {
    let pdf_path = pdf_path.as_ref();

    let text = pdf_extract::extract_text(pdf_path)
        .with_context(|| format!("PDFの解析に失敗: {:?}", pdf_path))?;

    if text.trim().is_empty() {
        anyhow::bail!("テキストが含まれていません: {:?}", pdf_path);
    }

    Ok(text)
}

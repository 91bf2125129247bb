//! ファイル名処理モジュール - サニタイズと移動

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// サニタイズ後のファイル名の最大長
const MAX_FILENAME_LEN: usize = 50;

/// 提案されたファイル名をサニタイズ
///
/// 半角英数字とアンダースコア以外の文字をすべて取り除き、最大50文字に制限する。
pub fn sanitize_filename(suggested: &str) -> String {
    suggested
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .take(MAX_FILENAME_LEN)
        .collect()
}

/// サニタイズで空になった場合の代替ファイル名を生成
///
/// 元のファイル名をベースにする。
pub fn fallback_filename(original: &Path) -> String {
    let stem = original
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unknown");
    sanitize_filename(&format!("{}_renamed", stem))
}

/// ファイルを指定フォルダへ `<名前>.pdf` として移動
///
/// 同名のファイルが既に存在する場合はエラーを返し、元のファイルはそのまま残す。
pub fn move_to_directory(original: &Path, directory: &Path, name: &str) -> Result<PathBuf> {
    let new_path = directory.join(format!("{}.pdf", name));

    if new_path.exists() {
        anyhow::bail!("同名のファイルが既に存在します: {:?}", new_path);
    }

    std::fs::rename(original, &new_path)
        .with_context(|| format!("{:?} から {:?} への移動に失敗", original, new_path))?;

    Ok(new_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("renamer_{}_{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn keeps_only_allowed_characters() {
        assert_eq!(sanitize_filename("My Report (Final)!!"), "MyReportFinal");
    }

    #[test]
    fn strips_non_ascii_characters() {
        assert_eq!(sanitize_filename("請求書_2024年3月分"), "_20243");
    }

    #[test]
    fn truncates_to_fifty_characters() {
        let long = "a".repeat(80);
        let sanitized = sanitize_filename(&long);
        assert_eq!(sanitized, "a".repeat(50));
    }

    #[test]
    fn is_idempotent_on_clean_input() {
        for input in ["QuarterlyReport", "My Report (Final)!!", "a_b_c123", "!!! ???"] {
            let once = sanitize_filename(input);
            assert_eq!(sanitize_filename(&once), once);
        }
    }

    #[test]
    fn output_stays_within_allowed_set() {
        for input in ["日本語テキスト", "a-b/c\\d:e", "  spaces  ", "mixed_OK_123!"] {
            let sanitized = sanitize_filename(input);
            assert!(sanitized.chars().count() <= 50);
            assert!(sanitized.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
        }
    }

    #[test]
    fn fallback_is_never_empty() {
        assert_eq!(fallback_filename(Path::new("/tmp/請求書.pdf")), "_renamed");
        assert_eq!(fallback_filename(Path::new("/tmp/report 2024.pdf")), "report2024_renamed");
    }

    #[test]
    fn moves_file_into_directory() {
        let source_dir = scratch_dir("move_src");
        let dest_dir = scratch_dir("move_dst");
        let source = source_dir.join("original.pdf");
        std::fs::write(&source, b"%PDF-dummy").unwrap();

        let new_path = move_to_directory(&source, &dest_dir, "QuarterlyReport").unwrap();

        assert_eq!(new_path, dest_dir.join("QuarterlyReport.pdf"));
        assert!(new_path.exists());
        assert!(!source.exists());

        let _ = std::fs::remove_dir_all(&source_dir);
        let _ = std::fs::remove_dir_all(&dest_dir);
    }

    #[test]
    fn refuses_to_overwrite_existing_file() {
        let source_dir = scratch_dir("collision_src");
        let dest_dir = scratch_dir("collision_dst");
        let source = source_dir.join("original.pdf");
        std::fs::write(&source, b"%PDF-dummy").unwrap();
        std::fs::write(dest_dir.join("Taken.pdf"), b"%PDF-existing").unwrap();

        assert!(move_to_directory(&source, &dest_dir, "Taken").is_err());
        // 元のファイルは残る
        assert!(source.exists());

        let _ = std::fs::remove_dir_all(&source_dir);
        let _ = std::fs::remove_dir_all(&dest_dir);
    }
}

//! PDFオートリネーマー - OpenAI Chat Completions API を使用したPDF自動リネームツール
//!
//! # 機能
//! - PDFファイルからのテキスト抽出
//! - 抽出テキストに基づくファイル名の自動提案（Chat Completions API）
//! - ファイル名のサニタイズ（半角英数字とアンダースコアのみ、最大50文字）
//! - 提案された名前での指定フォルダへの移動

pub mod error;
pub mod gui;
pub mod naming;
pub mod pdf;
pub mod pipeline;
pub mod suggest;

pub use error::RenameError;

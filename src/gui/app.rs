//! メインアプリケーションウィンドウ

use crate::error::RenameError;
use crate::naming;
use crate::pipeline::{self, PipelineEvent};
use crate::suggest::SuggestClient;
use anyhow::Result;
use eframe::egui;
use egui::{CentralPanel, RichText, Vec2};
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use tokio::runtime::Runtime;

use super::theme::{dark_theme, Colors};

/// アプリケーション状態
pub struct AutoRenamerApp {
    /// ファイル名提案クライアント
    suggest_client: Option<Arc<SuggestClient>>,
    /// Tokioランタイム
    runtime: Runtime,
    /// 処理中かどうか
    is_processing: bool,
    /// ステータスメッセージ
    status: String,
    /// 最後に移動した先のフォルダ
    last_folder: Option<PathBuf>,
    /// イベント受信チャンネル
    event_rx: Receiver<PipelineEvent>,
    /// イベント送信チャンネル
    event_tx: Sender<PipelineEvent>,
}

impl Default for AutoRenamerApp {
    fn default() -> Self {
        let (event_tx, event_rx) = channel();

        // クライアントの初期化（OPENAI_API_KEY 未設定の場合は None）
        let suggest_client = SuggestClient::from_env().ok().map(Arc::new);

        Self {
            suggest_client,
            runtime: Runtime::new().expect("Tokioランタイムの作成に失敗"),
            is_processing: false,
            status: "PDFファイルを選択して開始".to_string(),
            last_folder: None,
            event_rx,
            event_tx,
        }
    }
}

impl AutoRenamerApp {
    /// 選択されたPDFの処理を開始
    fn start(&mut self, pdf_path: PathBuf) {
        let Some(client) = self.suggest_client.clone() else {
            self.status = "APIクライアントが初期化されていません".to_string();
            return;
        };

        self.is_processing = true;
        self.status = "テキストを抽出中...".to_string();

        let tx = self.event_tx.clone();

        // バックグラウンドで抽出と提案を実行
        self.runtime
            .spawn(pipeline::extract_and_suggest(pdf_path, client, tx));
    }

    /// ファイル選択ダイアログを開いて処理を開始
    fn pick_and_start(&mut self) {
        match rfd::FileDialog::new()
            .add_filter("PDF files", &["pdf"])
            .pick_file()
        {
            Some(path) => self.start(path),
            None => self.status = RenameError::Cancelled.to_string(),
        }
    }

    /// パイプラインからのイベントを受信
    fn receive_events(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            match event {
                PipelineEvent::Progress(message) => {
                    self.status = message;
                }
                PipelineEvent::Suggested { original, name } => {
                    self.finish_move(original, name);
                    self.is_processing = false;
                }
                PipelineEvent::Failed(e) => {
                    self.status = e.to_string();
                    self.is_processing = false;
                }
            }
        }
    }

    /// 移動先フォルダを選択してファイルを移動
    fn finish_move(&mut self, original: PathBuf, name: String) {
        let Some(directory) = rfd::FileDialog::new().pick_folder() else {
            self.status = RenameError::Cancelled.to_string();
            return;
        };

        match naming::move_to_directory(&original, &directory, &name) {
            Ok(new_path) => {
                self.status = format!("リネームして移動しました: {}", new_path.display());
                self.last_folder = Some(directory);
            }
            Err(e) => {
                self.status = RenameError::MoveFailed(e.to_string()).to_string();
            }
        }
    }
}

impl eframe::App for AutoRenamerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // 結果を受信
        self.receive_events();

        // ドロップされたPDFを処理（最初の1件のみ）
        if !self.is_processing {
            let dropped: Option<PathBuf> = ctx.input(|i| {
                i.raw
                    .dropped_files
                    .iter()
                    .filter_map(|f| f.path.clone())
                    .find(|p| p.extension().is_some_and(|e| e.eq_ignore_ascii_case("pdf")))
            });

            if let Some(path) = dropped {
                self.start(path);
            }
        }

        // 処理中は再描画を要求
        if self.is_processing {
            ctx.request_repaint();
        }

        CentralPanel::default().show(ctx, |ui| {
            ui.spacing_mut().item_spacing = Vec2::new(8.0, 12.0);

            // ヘッダー
            ui.horizontal(|ui| {
                ui.heading(
                    RichText::new("PDFオートリネーマー")
                        .size(28.0)
                        .color(Colors::TEXT_PRIMARY),
                );

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui
                        .add_enabled(
                            self.last_folder.is_some(),
                            egui::Button::new("📁 フォルダを開く"),
                        )
                        .clicked()
                    {
                        if let Some(ref folder) = self.last_folder {
                            let _ = open::that(folder);
                        }
                    }
                });
            });

            ui.label(
                RichText::new("PDFを選択 → 内容から名前を提案 → 選んだフォルダへ移動")
                    .size(14.0)
                    .color(Colors::TEXT_SECONDARY),
            );

            ui.add_space(10.0);

            // 警告メッセージ（クライアントが初期化できなかった場合のみ）
            if self.suggest_client.is_none() {
                ui.group(|ui| {
                    ui.horizontal(|ui| {
                        ui.label(RichText::new("⚠").size(24.0).color(Colors::ERROR));
                        ui.label(
                            RichText::new("OPENAI_API_KEY が設定されていません")
                                .color(Colors::ERROR),
                        );
                    });
                });
                ui.add_space(10.0);
            }

            // ドロップゾーン
            let is_hovering = !ui.ctx().input(|i| i.raw.hovered_files.is_empty());

            let frame_color = if is_hovering {
                Colors::ACCENT
            } else {
                Colors::BORDER
            };

            let bg_color = if is_hovering {
                Colors::BG_HOVER
            } else {
                Colors::BG_CARD
            };

            let drop_zone_response = egui::Frame::new()
                .fill(bg_color)
                .stroke(egui::Stroke::new(2.0, frame_color))
                .corner_radius(16.0)
                .inner_margin(40.0)
                .show(ui, |ui| {
                    ui.set_min_size(Vec2::new(ui.available_width(), 160.0));
                    ui.vertical_centered(|ui| {
                        let icon = if is_hovering { "📥" } else { "📄" };
                        ui.label(RichText::new(icon).size(64.0));

                        ui.label(
                            RichText::new("PDFファイルをここにドロップ")
                                .size(20.0)
                                .color(Colors::TEXT_PRIMARY),
                        );

                        ui.label(
                            RichText::new("または、クリックしてファイルを選択")
                                .size(14.0)
                                .color(Colors::TEXT_SECONDARY),
                        );
                    });
                });

            // クリックでファイル選択
            if drop_zone_response.response.clicked() && !self.is_processing {
                self.pick_and_start();
            }

            ui.add_space(10.0);

            // 処理中表示
            if self.is_processing {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(RichText::new(&self.status).color(Colors::ACCENT));
                });
            }

            // ステータスバー
            ui.with_layout(egui::Layout::bottom_up(egui::Align::LEFT), |ui| {
                egui::Frame::new()
                    .fill(Colors::BG_CARD)
                    .inner_margin(egui::Margin::symmetric(20, 15))
                    .show(ui, |ui| {
                        ui.label(
                            RichText::new(&self.status)
                                .size(13.0)
                                .color(Colors::TEXT_SECONDARY),
                        );
                    });
            });
        });
    }
}

/// アプリケーションを起動
pub fn run() -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([520.0, 460.0])
            .with_min_inner_size([440.0, 400.0])
            .with_title("PDFオートリネーマー")
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "PDFオートリネーマー",
        options,
        Box::new(|cc| {
            // ダークテーマを設定
            cc.egui_ctx.set_style(dark_theme());

            // 日本語フォントを設定
            let mut fonts = egui::FontDefinitions::default();

            // システムの日本語フォントを追加
            #[cfg(windows)]
            {
                if let Ok(font_data) = std::fs::read("C:\\Windows\\Fonts\\YuGothM.ttc") {
                    fonts.font_data.insert(
                        "yu_gothic".to_owned(),
                        egui::FontData::from_owned(font_data).into(),
                    );

                    fonts
                        .families
                        .entry(egui::FontFamily::Proportional)
                        .or_default()
                        .insert(0, "yu_gothic".to_owned());

                    fonts
                        .families
                        .entry(egui::FontFamily::Monospace)
                        .or_default()
                        .push("yu_gothic".to_owned());
                }
            }

            cc.egui_ctx.set_fonts(fonts);

            Ok(Box::new(AutoRenamerApp::default()))
        }),
    )
    .map_err(|e| anyhow::anyhow!("アプリケーションエラー: {}", e))
}

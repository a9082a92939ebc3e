use eframe::egui::{self, Color32, RichText};
use eframe::egui::{FontData, FontDefinitions, FontFamily};
use rand::rngs::ThreadRng;

use crate::io::{default_export_name, default_state_path, export_workbook, load_records};
use crate::model::AppState;
use interview_common::{ChartEntry, Command, Dashboard, FileStore, Snapshot, bundled_records};

const CHART_HEIGHT: f32 = 260.0;
const LABEL_HEIGHT: f32 = 18.0;
const BAR_GAP: f32 = 0.2;

pub struct DesktopApp {
    dashboard: Dashboard<FileStore, ThreadRng>,
    state: AppState,
}

impl DesktopApp {
    pub fn new() -> Self {
        let store = FileStore::open(default_state_path());
        let dashboard = Dashboard::new(bundled_records(), store, rand::rng());
        let state = AppState::from_view(dashboard.view());
        Self { dashboard, state }
    }

    fn apply(&mut self, commands: Vec<Command>) {
        for command in commands {
            if let Err(err) = self.dashboard.dispatch(command) {
                self.state.status = format!("Save failed: {err}");
            }
        }
    }

    fn open_dataset(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .pick_file()
        {
            match load_records(&path) {
                Ok(records) => {
                    self.state.status = format!("Loaded {} ({} records)", path.display(), records.len());
                    self.dashboard.replace_records(records);
                    self.state.source_path = Some(path);
                }
                Err(err) => self.state.status = format!("Load failed: {err:#}"),
            }
        }
    }

    fn use_bundled(&mut self) {
        self.dashboard.replace_records(bundled_records());
        self.state.source_path = None;
        self.state.status = "Using bundled dataset".to_string();
    }

    fn export_excel(&mut self) {
        let default_name = default_export_name(self.state.source_path.as_deref());
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Excel", &["xlsx"])
            .set_file_name(default_name.as_str())
            .save_file()
        else {
            return;
        };

        let title = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("Interview Scores")
            .to_string();
        match export_workbook(&path, self.dashboard.chart(), self.dashboard.selection(), &title) {
            Ok(()) => self.state.status = format!("Exported {}", path.display()),
            Err(err) => self.state.status = format!("Export failed: {err:#}"),
        }
    }

    fn render_controls(&mut self, ui: &mut egui::Ui, snapshot: &Snapshot, commands: &mut Vec<Command>) {
        ui.horizontal(|ui| {
            ui.label("Search");
            let response = ui.add(
                egui::TextEdit::singleline(&mut self.state.search_input)
                    .hint_text("name, question or response")
                    .desired_width(260.0),
            );
            if response.changed() {
                commands.push(Command::SetSearchTerm(self.state.search_input.clone()));
            }

            ui.add_space(16.0);
            ui.label("Page size");
            let response = ui.add(
                egui::TextEdit::singleline(&mut self.state.page_size_input).desired_width(48.0),
            );
            if response.changed() {
                if let Some(command) = Command::page_size_input(&self.state.page_size_input) {
                    commands.push(command);
                }
            }
            if response.lost_focus() {
                self.state.page_size_input = snapshot.view.page_size.get().to_string();
            }
        });

        ui.label(
            RichText::new(format!(
                "{} matches / page {} of {} / {} selected",
                snapshot.total_matches,
                snapshot.view.current_page,
                snapshot.view.total_pages,
                snapshot.selected_count
            ))
            .color(Color32::from_gray(170)),
        );
    }

    fn render_table(ui: &mut egui::Ui, snapshot: &Snapshot, commands: &mut Vec<Command>) {
        if snapshot.rows.is_empty() {
            ui.label("No matching records.");
            return;
        }

        egui::Grid::new("records")
            .striped(true)
            .num_columns(5)
            .min_col_width(40.0)
            .show(ui, |ui| {
                ui.label("");
                ui.label(RichText::new("Candidate Name").strong());
                ui.label(RichText::new("Interview Question").strong());
                ui.label(RichText::new("Candidate Response").strong());
                ui.label(RichText::new("AI Score").strong());
                ui.end_row();

                for row in &snapshot.rows {
                    let mut checked = row.selected;
                    if ui.checkbox(&mut checked, "").changed() {
                        commands.push(Command::Toggle(row.record.candidate_name.clone()));
                    }
                    ui.label(&row.record.candidate_name);
                    ui.add(egui::Label::new(&row.record.interview_question).wrap(true));
                    ui.add(egui::Label::new(&row.record.candidate_response).wrap(true));
                    ui.label(row.record.ai_generated_score.to_string());
                    ui.end_row();
                }
            });
    }

    fn render_pages(ui: &mut egui::Ui, snapshot: &Snapshot, commands: &mut Vec<Command>) {
        ui.horizontal(|ui| {
            ui.label("Page");
            for link in &snapshot.page_links {
                let text = RichText::new(link.number.to_string());
                let text = if link.active { text.strong() } else { text };
                if ui.selectable_label(link.active, text).clicked() && !link.active {
                    commands.push(Command::SetPage(link.number));
                }
            }
        });
    }
}

/// 描画領域内の棒の矩形（エントリ順、最大値が領域の高さ）
pub fn bar_rects(area: egui::Rect, values: &[f64]) -> Vec<egui::Rect> {
    if values.is_empty() {
        return Vec::new();
    }
    let max_value = values.iter().copied().fold(0.0_f64, f64::max).max(1.0);
    let slot = area.width() / values.len() as f32;
    let bar_width = slot * (1.0 - BAR_GAP);

    values
        .iter()
        .enumerate()
        .map(|(i, value)| {
            let height = (value.max(0.0) / max_value) as f32 * area.height();
            let left = area.left() + slot * i as f32 + (slot - bar_width) / 2.0;
            egui::Rect::from_min_max(
                egui::pos2(left, area.bottom() - height),
                egui::pos2(left + bar_width, area.bottom()),
            )
        })
        .collect()
}

fn paint_chart(ui: &mut egui::Ui, entries: &[ChartEntry]) {
    if entries.is_empty() {
        ui.label("Tick rows in the table to chart their scores.");
        return;
    }

    let (rect, _) = ui.allocate_exact_size(
        egui::vec2(ui.available_width(), CHART_HEIGHT),
        egui::Sense::hover(),
    );
    let painter = ui.painter_at(rect);
    let plot = egui::Rect::from_min_max(rect.min, egui::pos2(rect.right(), rect.bottom() - LABEL_HEIGHT));
    let values: Vec<f64> = entries.iter().map(|e| e.value).collect();

    for (i, (bar, entry)) in bar_rects(plot, &values).into_iter().zip(entries).enumerate() {
        let (r, g, b) = entry.color.rgb();
        painter.rect_filled(bar, 2.0, Color32::from_rgb(r, g, b));
        painter.text(
            egui::pos2(bar.center().x, rect.bottom()),
            egui::Align2::CENTER_BOTTOM,
            &entry.category,
            egui::FontId::proportional(11.0),
            ui.visuals().text_color(),
        );
        ui.interact(bar, ui.id().with(("bar", i)), egui::Sense::hover())
            .on_hover_text(&entry.hover_text);
    }
}

pub fn configure_fonts(ctx: &egui::Context) {
    let mut fonts = FontDefinitions::default();
    let candidates = [
        r"C:\Windows\Fonts\meiryo.ttc",
        r"C:\Windows\Fonts\msgothic.ttc",
        "/System/Library/Fonts/Supplemental/Arial Unicode.ttf",
        "/usr/share/fonts/truetype/noto/NotoSansCJK-Regular.ttc",
        "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    ];

    for path in candidates {
        if let Ok(data) = std::fs::read(path) {
            fonts.font_data.insert("cjk_fallback".to_string(), FontData::from_owned(data));
            fonts.families
                .entry(FontFamily::Proportional)
                .or_default()
                .push("cjk_fallback".to_string());
            ctx.set_fonts(fonts);
            return;
        }
    }
}

impl eframe::App for DesktopApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let snapshot = self.dashboard.snapshot();
        let mut commands = Vec::new();

        egui::TopBottomPanel::top("top").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Dataset").clicked() {
                        self.open_dataset();
                        ui.close_menu();
                    }
                    if ui.add_enabled(self.state.source_path.is_some(), egui::Button::new("Use Bundled Dataset")).clicked() {
                        self.use_bundled();
                        ui.close_menu();
                    }
                    if ui.button("Export Excel").clicked() {
                        self.export_excel();
                        ui.close_menu();
                    }
                });

                ui.menu_button("Selection", |ui| {
                    if ui.add_enabled(snapshot.selected_count > 0, egui::Button::new("Clear")).clicked() {
                        commands.push(Command::ClearSelection);
                        ui.close_menu();
                    }
                });

                ui.separator();
                ui.label(RichText::new(self.state.source_label()).color(Color32::from_gray(170)));
                if !self.state.status.is_empty() {
                    ui.label(RichText::new(&self.state.status).color(Color32::from_rgb(246, 196, 69)));
                }
            });
        });

        egui::TopBottomPanel::bottom("chart")
            .resizable(true)
            .min_height(CHART_HEIGHT + 40.0)
            .show(ctx, |ui| {
                ui.heading("AI Score");
                paint_chart(ui, &snapshot.chart);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_controls(ui, &snapshot, &mut commands);
            ui.separator();
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .max_height(ui.available_height() - 32.0)
                .show(ui, |ui| {
                    Self::render_table(ui, &snapshot, &mut commands);
                });
            ui.separator();
            Self::render_pages(ui, &snapshot, &mut commands);
        });

        if !commands.is_empty() {
            self.apply(commands);
            ctx.request_repaint();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn area() -> egui::Rect {
        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(200.0, 100.0))
    }

    #[test]
    fn bar_rects_scale_to_tallest() {
        let bars = bar_rects(area(), &[50.0, 100.0]);
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].height(), 50.0);
        assert_eq!(bars[1].height(), 100.0);
        assert_eq!(bars[0].bottom(), 100.0);
        assert!(bars[0].right() <= bars[1].left());
    }

    #[test]
    fn bar_rects_empty_and_zero() {
        assert!(bar_rects(area(), &[]).is_empty());
        let bars = bar_rects(area(), &[0.0]);
        assert_eq!(bars[0].height(), 0.0);
    }

    #[test]
    fn source_label_defaults_to_bundled() {
        assert_eq!(AppState::default().source_label(), "bundled dataset");
        let path = Path::new("/data/round1.json");
        let state = AppState {
            source_path: Some(path.to_path_buf()),
            ..AppState::default()
        };
        assert_eq!(state.source_label(), "/data/round1.json");
    }
}

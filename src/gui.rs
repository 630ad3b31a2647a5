// Vitrine - gui.rs
//
// The eframe::App hookup.
// Wires together all UI panels and handles catalogue lifecycle actions
// (import, folder import, reload) requested by the panels.

use crate::app::catalog_mgr;
use crate::app::state::{ActiveView, AppState};
use crate::core::discover::DiscoverConfig;
use crate::platform::config::AppConfig;
use crate::ui;

/// Which central view to draw this frame. Mirrors `ActiveView` without
/// the item borrow so panels can take `&mut AppState`.
enum CentralView {
    Onboarding,
    List,
    Detail,
}

/// The Vitrine application.
pub struct VitrineApp {
    pub state: AppState,
    pub config: AppConfig,
    /// Font size last pushed into the egui style; NaN until first applied.
    applied_font_size: f32,
}

impl VitrineApp {
    /// Create a new application instance with the given state and config.
    pub fn new(state: AppState, config: AppConfig) -> Self {
        Self {
            state,
            config,
            applied_font_size: f32::NAN,
        }
    }

    /// Discovery settings for the next folder import: runtime limits from
    /// the Options dialog, glob patterns from config.toml.
    fn discover_config(&self) -> DiscoverConfig {
        DiscoverConfig {
            max_depth: self.state.max_import_depth,
            max_files: self.state.max_files_limit,
            include_patterns: self.config.include_patterns.clone(),
            exclude_patterns: self.config.exclude_patterns.clone(),
        }
    }

    /// Re-load all catalogues from disk and rebuild the item list.
    fn reload_catalogs(&mut self) {
        let (catalogs, errors) =
            catalog_mgr::load_all_catalogs(self.state.user_catalogs_dir.as_deref());
        for err in &errors {
            self.state.push_warning(format!("Catalogue warning: {err}"));
        }
        self.state.catalogs = catalogs;
        self.state.rebuild_items();
    }

    /// Install the given pack files into the user catalogue directory.
    fn import_files(&mut self, files: Vec<std::path::PathBuf>) {
        let Some(user_dir) = self.state.user_catalogs_dir.clone() else {
            self.state.status_message = "No catalogue folder available.".to_string();
            return;
        };

        let mut installed = 0;
        for file in files {
            match catalog_mgr::install_catalog(&file, &user_dir) {
                Ok(catalog) => {
                    tracing::info!(catalog_id = %catalog.id, "Catalogue imported");
                    installed += 1;
                }
                Err(e) => {
                    self.state
                        .push_warning(format!("Skipped '{}': {e}", file.display()));
                }
            }
        }

        if installed > 0 {
            self.reload_catalogs();
        }
        self.state.status_message = format!(
            "Imported {installed} catalogue{}.",
            if installed == 1 { "" } else { "s" }
        );
    }

    /// Walk a folder for pack files and install every valid one.
    fn import_folder(&mut self, root: std::path::PathBuf) {
        let Some(user_dir) = self.state.user_catalogs_dir.clone() else {
            self.state.status_message = "No catalogue folder available.".to_string();
            return;
        };

        match catalog_mgr::import_folder(&root, &user_dir, &self.discover_config()) {
            Ok((installed, warnings)) => {
                for warn in warnings {
                    self.state.push_warning(warn);
                }
                if installed > 0 {
                    self.reload_catalogs();
                }
                self.state.status_message = format!(
                    "Imported {installed} catalogue{} from '{}'.",
                    if installed == 1 { "" } else { "s" },
                    root.display()
                );
                self.state.last_import_root = Some(root);
            }
            Err(e) => {
                self.state.status_message = format!("Folder import failed: {e}");
            }
        }
    }
}

/// Push an absolute text-style table derived from `size` into the style.
///
/// Sizes are absolute (not multiplied into the current style) so repeated
/// application is idempotent.
fn apply_font_size(ctx: &egui::Context, size: f32) {
    let mut style = (*ctx.style()).clone();
    style.text_styles = [
        (
            egui::TextStyle::Heading,
            egui::FontId::proportional(size * 1.35),
        ),
        (egui::TextStyle::Body, egui::FontId::proportional(size)),
        (
            egui::TextStyle::Monospace,
            egui::FontId::monospace(size * 0.95),
        ),
        (egui::TextStyle::Button, egui::FontId::proportional(size)),
        (
            egui::TextStyle::Small,
            egui::FontId::proportional(size * 0.8),
        ),
    ]
    .into();
    ctx.set_style(style);
}

impl eframe::App for VitrineApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Apply the font size whenever the Options slider moved it.
        if (self.applied_font_size - self.state.ui_font_size).abs() > 0.01
            || self.applied_font_size.is_nan()
        {
            apply_font_size(ctx, self.state.ui_font_size);
            self.applied_font_size = self.state.ui_font_size;
        }

        // Esc returns from the detail view; harmless elsewhere because
        // clearing an empty selection is a no-op.
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.state.clear_selection();
        }

        // ---- Handle flags set by panels ----
        if self.state.request_reload_catalogs {
            self.state.request_reload_catalogs = false;
            self.reload_catalogs();
        }
        if self.state.request_open_catalog_dir {
            self.state.request_open_catalog_dir = false;
            if let Some(dir) = self.state.user_catalogs_dir.clone() {
                // The folder may not exist yet on a fresh install.
                if let Err(e) = std::fs::create_dir_all(&dir) {
                    tracing::warn!(
                        dir = %dir.display(),
                        error = %e,
                        "Failed to create catalogue directory"
                    );
                    self.state.status_message = format!("Cannot create catalogue folder: {e}");
                } else {
                    crate::platform::fs::open_directory(&dir);
                }
            }
        }
        if let Some(path) = self.state.request_reveal_source.take() {
            crate::platform::fs::reveal_in_file_manager(&path);
        }

        // Menu bar across the top
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Import Catalogue(s)\u{2026}").clicked() {
                        if let Some(files) = rfd::FileDialog::new()
                            .add_filter("Catalogue packs", &["toml"])
                            .pick_files()
                        {
                            self.import_files(files);
                        }
                        ui.close_menu();
                    }
                    if ui.button("Import Folder\u{2026}").clicked() {
                        let mut dialog = rfd::FileDialog::new();
                        if let Some(ref dir) = self.state.last_import_root {
                            dialog = dialog.set_directory(dir);
                        }
                        if let Some(root) = dialog.pick_folder() {
                            self.import_folder(root);
                        }
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Reload Catalogues").clicked() {
                        self.state.request_reload_catalogs = true;
                        ui.close_menu();
                    }
                    ui.separator();
                    // Export sub-menu -- enabled only when items are visible
                    let has_items = !self.state.visible_indices.is_empty();
                    ui.add_enabled_ui(has_items, |ui| {
                        ui.menu_button("Export", |ui| {
                            if ui.button("Export CSV...").clicked() {
                                if let Some(dest) = rfd::FileDialog::new()
                                    .add_filter("CSV", &["csv"])
                                    .set_file_name("collection.csv")
                                    .save_file()
                                {
                                    let msg = {
                                        let rows = self.state.visible_in_display_order();
                                        match std::fs::File::create(&dest) {
                                            Ok(f) => {
                                                match crate::core::export::export_csv(
                                                    &rows, f, &dest,
                                                ) {
                                                    Ok(n) => {
                                                        format!("Exported {n} items to CSV.")
                                                    }
                                                    Err(e) => {
                                                        format!("CSV export failed: {e}")
                                                    }
                                                }
                                            }
                                            Err(e) => format!("Cannot create file: {e}"),
                                        }
                                    };
                                    self.state.status_message = msg;
                                }
                                ui.close_menu();
                            }
                            if ui.button("Export JSON...").clicked() {
                                if let Some(dest) = rfd::FileDialog::new()
                                    .add_filter("JSON", &["json"])
                                    .set_file_name("collection.json")
                                    .save_file()
                                {
                                    let msg = {
                                        let rows = self.state.visible_in_display_order();
                                        match std::fs::File::create(&dest) {
                                            Ok(f) => {
                                                match crate::core::export::export_json(
                                                    &rows, f, &dest,
                                                ) {
                                                    Ok(n) => {
                                                        format!("Exported {n} items to JSON.")
                                                    }
                                                    Err(e) => {
                                                        format!("JSON export failed: {e}")
                                                    }
                                                }
                                            }
                                            Err(e) => format!("Cannot create file: {e}"),
                                        }
                                    };
                                    self.state.status_message = msg;
                                }
                                ui.close_menu();
                            }
                        });
                    });
                    ui.separator();
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
                ui.menu_button("View", |ui| {
                    if ui.button("Collection Summary").clicked() {
                        self.state.show_summary = true;
                        ui.close_menu();
                    }
                    if ui.button("Options\u{2026}").clicked() {
                        self.state.show_options = true;
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("About").clicked() {
                        self.state.show_about = true;
                        ui.close_menu();
                    }
                });
            });
        });

        // Status strip along the bottom
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(ui::theme::STATUS_BAR_HEIGHT)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(&self.state.status_message);
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let total = self.state.items.len();
                        let visible = self.state.visible_indices.len();
                        if total > 0 {
                            ui.label(format!("{visible}/{total} items"));
                        }
                    });
                });
            });

        // Resolve the central view before the panels take &mut state.
        let view = match self.state.active_view() {
            ActiveView::Onboarding => CentralView::Onboarding,
            ActiveView::List => CentralView::List,
            ActiveView::Detail(_) => CentralView::Detail,
        };

        // Left sidebar — hidden during onboarding; two independent scroll
        // areas so catalogues and filters each get proportional room.
        if !matches!(view, CentralView::Onboarding) {
            egui::SidePanel::left("sidebar")
                .default_width(ui::theme::SIDEBAR_WIDTH)
                .resizable(true)
                .show(ctx, |ui| {
                    let available = ui.available_height();
                    // Catalogue section: top ~45 % of the sidebar.
                    egui::ScrollArea::vertical()
                        .id_salt("sidebar_catalogs")
                        .max_height(available * 0.45)
                        .show(ui, |ui| {
                            ui::panels::catalogs::render(ui, &mut self.state);
                        });

                    ui.separator();

                    // Filters take whatever height is left.
                    egui::ScrollArea::vertical()
                        .id_salt("sidebar_filters")
                        .auto_shrink([false; 2])
                        .show(ui, |ui| {
                            ui::panels::filters::render(ui, &mut self.state);
                        });
                });
        }

        // Central panel: exactly one of onboarding, gallery, detail.
        egui::CentralPanel::default().show(ctx, |ui| match view {
            CentralView::Onboarding => ui::panels::onboarding::render(ui, &mut self.state),
            CentralView::List => ui::panels::gallery::render(ui, &mut self.state),
            CentralView::Detail => ui::panels::detail::render(ui, &mut self.state),
        });

        // Dialogs (modal-ish)
        ui::panels::summary::render(ctx, &mut self.state);
        ui::panels::options::render(ctx, &mut self.state);
        ui::panels::about::render(ctx, &mut self.state);
    }

    /// eframe invokes this as the window closes; the session is written
    /// here so the next launch can pick up where this one stopped.
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.state.save_session();
    }
}

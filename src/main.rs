// Vitrine - main.rs
//
// Binary entry point: parse the CLI, bring up config and logging, load
// catalogues (built-in plus user packs), restore the previous session,
// then hand everything to eframe.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod gui;

// The binary re-exports the library's modules so gui.rs can keep
// referring to `crate::app::...` and friends.
pub use vitrine::app;

pub use vitrine::core;
pub use vitrine::platform;
pub use vitrine::ui;
pub use vitrine::util;

use clap::Parser;
use std::path::PathBuf;

/// The 512x512 RGBA icon PNG, baked in with `include_bytes!` so it is
/// present no matter where the binary was launched from.
static ICON_PNG: &[u8] = include_bytes!("../assets/icon.png");

/// Turn the embedded PNG into the `IconData` eframe wants.
///
/// A decode failure degrades to a transparent 1x1 placeholder; a bad
/// asset must never stop the application from launching.
fn load_icon() -> egui::IconData {
    use image::ImageDecoder;

    // Whatever the source colour space, egui gets RGBA8.
    let decoded = image::codecs::png::PngDecoder::new(std::io::Cursor::new(ICON_PNG)).and_then(
        |decoder| {
            let (width, height) = decoder.dimensions();
            image::DynamicImage::from_decoder(decoder).map(|img| (img, width, height))
        },
    );

    match decoded {
        Ok((img, width, height)) => egui::IconData {
            rgba: img.into_rgba8().into_raw(),
            width,
            height,
        },
        Err(e) => {
            tracing::warn!(error = %e, "Failed to decode icon PNG; using placeholder");
            placeholder_icon()
        }
    }
}

/// Transparent 1x1 stand-in for a failed icon decode.
fn placeholder_icon() -> egui::IconData {
    egui::IconData {
        rgba: vec![0u8; 4],
        width: 1,
        height: 1,
    }
}

/// Set up the egui font stack.
///
/// Windows gets Segoe UI, Segoe UI Emoji, and Segoe UI Symbol read off
/// the system font directory and placed ahead of the bundled fonts;
/// their Unicode coverage is far wider than the egui built-ins, which
/// otherwise draw arrows and other symbols as squares. The bundled
/// fonts stay at the end of the list so no glyph that rendered before
/// is lost. Other platforms keep the egui defaults.
fn configure_fonts(ctx: &egui::Context) {
    #[cfg(target_os = "windows")]
    {
        let mut fonts = egui::FontDefinitions::default();

        // Priority order: Segoe UI for Latin and everyday UI glyphs,
        // Segoe UI Emoji for emoji and pictographs, Segoe UI Symbol for
        // mathematical, Braille, and other specialist blocks.
        let candidates: &[(&str, &str)] = &[
            ("Segoe UI", r"C:\Windows\Fonts\segoeui.ttf"),
            ("Segoe UI Emoji", r"C:\Windows\Fonts\seguiemj.ttf"),
            ("Segoe UI Symbol", r"C:\Windows\Fonts\seguisym.ttf"),
        ];

        let mut loaded_names: Vec<&str> = Vec::new();
        for (name, path) in candidates {
            let data = match std::fs::read(path) {
                Ok(d) => d,
                Err(e) => {
                    tracing::warn!(
                        font = name,
                        error = %e,
                        "Failed to load Windows system font; some symbols may render as squares"
                    );
                    continue;
                }
            };
            fonts
                .font_data
                .insert((*name).to_owned(), egui::FontData::from_owned(data).into());
            loaded_names.push(name);
            tracing::debug!(font = name, "Loaded Windows system font");
        }

        if !loaded_names.is_empty() {
            // Proportional: Windows fonts go in front of NotoSans, which
            // stays in the list as the last resort.
            if let Some(proportional) = fonts.families.get_mut(&egui::FontFamily::Proportional) {
                for (i, name) in loaded_names.iter().enumerate() {
                    proportional.insert(i, (*name).to_owned());
                }
            }

            // Monospace: append Windows fonts as symbol fallbacks after the
            // primary monospace font so pack paths and version strings keep
            // their alignment while unusual symbols still render correctly.
            if let Some(monospace) = fonts.families.get_mut(&egui::FontFamily::Monospace) {
                monospace.extend(loaded_names.iter().map(|n| (*n).to_owned()));
            }

            ctx.set_fonts(fonts);
            tracing::info!(fonts = ?loaded_names, "Windows system fonts active");
        }
    }

    // Everything else keeps the stock egui fonts.
    #[cfg(not(target_os = "windows"))]
    let _ = ctx;
}

/// Vitrine - Cross-platform gallery browser for curated collections.
///
/// Browse built-in and user-supplied catalogue packs in a grouped,
/// filterable gallery. Point Vitrine at a pack file or a folder of packs
/// to open them for this session without installing.
#[derive(Parser, Debug)]
#[command(name = "Vitrine", version, about)]
struct Cli {
    /// Catalogue pack (.toml) or folder of packs to open for this session.
    path: Option<PathBuf>,

    /// Additional directory containing user catalogue packs.
    #[arg(short = 'c', long = "catalog-dir")]
    catalog_dir: Option<PathBuf>,

    /// Show only this category at startup.
    #[arg(long = "category")]
    category: Option<String>,

    /// Verbose logging, same effect as RUST_LOG=debug.
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    // Resolve platform paths and load config BEFORE logging init so the
    // [logging] level from config.toml can take effect. Anything these
    // two steps need to tell the user comes back as warning strings.
    let platform_paths = platform::config::PlatformPaths::resolve();
    let (config, config_warnings) = platform::config::load_config(&platform_paths.config_dir);

    util::logging::init(cli.debug, config.log_level.as_deref());

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        "Vitrine starting"
    );

    // Determine catalogue directory: CLI override > config > platform default
    let user_catalog_dir = cli
        .catalog_dir
        .clone()
        .or_else(|| config.user_catalog_directory.clone())
        .unwrap_or_else(|| platform_paths.user_catalogs_dir.clone());

    // Load catalogues (built-in + user packs)
    let (mut catalogs, catalog_errors) =
        app::catalog_mgr::load_all_catalogs(Some(&user_catalog_dir));

    // A positional path opens extra packs for this session only.
    let mut cli_path_errors: Vec<String> = Vec::new();
    if let Some(ref path) = cli.path {
        if path.is_dir() {
            let (extra, errors) = app::catalog_mgr::load_catalogs_from_dir(path);
            for catalog in extra {
                app::catalog_mgr::merge_catalog(&mut catalogs, catalog);
            }
            cli_path_errors.extend(errors.iter().map(|e| format!("'{}': {e}", path.display())));
        } else {
            match app::catalog_mgr::load_catalog_file(path) {
                Ok(catalog) => app::catalog_mgr::merge_catalog(&mut catalogs, catalog),
                Err(e) => cli_path_errors.push(format!("'{}': {e}", path.display())),
            }
        }
    }

    for err in &catalog_errors {
        tracing::warn!(error = %err, "Catalogue loading warning");
    }

    tracing::info!(catalogs = catalogs.len(), "Ready to launch GUI");

    // Seed the application state from config and platform paths.
    let mut state = app::state::AppState::new(catalogs, cli.debug);
    state.ui_font_size = config.font_size;
    state.max_files_limit = config.max_files;
    state.max_import_depth = config.max_depth;
    state.user_catalogs_dir = Some(user_catalog_dir);
    state.session_file = Some(app::session::session_path(&platform_paths.data_dir));

    // Surface startup warnings in the UI warning list.
    for warn in config_warnings {
        state.push_warning(warn);
    }
    for err in &catalog_errors {
        state.push_warning(format!("Catalogue warning: {err}"));
    }
    for err in cli_path_errors {
        state.push_warning(format!("Could not open {err}"));
    }

    // Restore the previous session (onboarding flag + filters). First run
    // has no session file, so the welcome view shows.
    if let Some(path) = state.session_file.clone() {
        if let Some(data) = app::session::load(&path) {
            state.restore_session(data);
        }
    }

    // A --category flag overrides any restored filter.
    if let Some(ref category) = cli.category {
        state.filter_state = core::filter::FilterState::category_only(category);
        state.regex_input.clear();
        state.regex_error = None;
        state.apply_filters();
    }

    // Hand over to eframe.
    //
    // The window icon arrives by two routes: build.rs embeds an EXE
    // resource on Windows (taskbar, Alt+Tab, title bar, Explorer), and
    // the viewport below gets the PNG at runtime, which is what counts
    // on Linux/macOS and for the eframe-managed window everywhere.
    let icon_data = load_icon();

    let title = format!(
        "{} v{}",
        util::constants::APP_NAME,
        util::constants::APP_VERSION
    );
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(title)
            .with_inner_size([config.window_width, config.window_height])
            .with_min_inner_size([
                util::constants::MIN_WINDOW_WIDTH,
                util::constants::MIN_WINDOW_HEIGHT,
            ])
            .with_icon(icon_data),
        ..Default::default()
    };

    let dark_mode = config.dark_mode;
    let result = eframe::run_native(
        util::constants::APP_NAME,
        native_options,
        Box::new(move |cc| {
            configure_fonts(&cc.egui_ctx);
            if dark_mode {
                cc.egui_ctx.set_visuals(egui::Visuals::dark());
            } else {
                cc.egui_ctx.set_visuals(egui::Visuals::light());
            }
            Ok(Box::new(gui::VitrineApp::new(state, config)))
        }),
    );

    if let Err(e) = result {
        tracing::error!(error = %e, "Failed to launch GUI");
        eprintln!("Error: Failed to launch Vitrine GUI: {e}");
        std::process::exit(1);
    }
}

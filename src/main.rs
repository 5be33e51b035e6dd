use clap::Parser;
use eframe::egui;
use log::{debug, info};

use compedit::app::CompEditApp;
use compedit::cli::Args;
use compedit::config;
use compedit::entities::{Composite, CompositeKind, Packing};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments first (needed for log setup)
    let args = Args::parse();

    // Create path configuration from CLI args and environment
    let path_config = config::PathConfig::from_env_and_cli(args.config_dir.clone());

    // Ensure directories exist
    if let Err(e) = config::ensure_dirs(&path_config) {
        eprintln!("Warning: Failed to create application directories: {}", e);
    }

    // Determine log level based on verbosity flags
    // 0 (default) = warn, 1 (-v) = info, 2 (-vv) = debug, 3+ (-vvv) = trace
    let log_level = match args.verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    // Initialize logger based on --log flag
    if let Some(log_path_opt) = &args.log_file {
        // File logging with specified verbosity level
        let log_path = log_path_opt
            .as_ref()
            .cloned()
            .unwrap_or_else(|| config::data_file("compedit.log", &path_config));

        let file = std::fs::File::create(&log_path)?;

        env_logger::Builder::new()
            .filter_level(log_level)
            .filter_module("egui", log::LevelFilter::Info) // Suppress egui DEBUG spam
            .format_timestamp_millis()
            .target(env_logger::Target::Pipe(Box::new(file)))
            .init();

        info!(
            "Logging to file: {} (level: {:?})",
            log_path.display(),
            log_level
        );
    } else {
        // Console logging with specified verbosity level (respects RUST_LOG if set)
        let default_level = match args.verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
            .filter_module("egui", log::LevelFilter::Info) // Suppress egui DEBUG spam
            .format_timestamp_millis()
            .init();
    }

    info!("CompEdit composite editor starting...");
    debug!("Command-line args: {:?}", args);
    info!(
        "Config path: {}",
        config::config_file("compedit.json", &path_config).display()
    );

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!("CompEdit v{}", env!("CARGO_PKG_VERSION")))
            .with_inner_size([900.0, 600.0])
            .with_resizable(true),
        persist_window: true,
        #[cfg(not(target_arch = "wasm32"))]
        persistence_path: Some(config::config_file("compedit.json", &path_config)),
        ..Default::default()
    };

    eframe::run_native(
        "CompEdit",
        native_options,
        Box::new(move |cc| {
            // Load persisted app state if available, otherwise create default
            let mut app: CompEditApp = cc
                .storage
                .and_then(|storage| storage.get_string(eframe::APP_KEY))
                .and_then(|json| serde_json::from_str(&json).ok())
                .unwrap_or_else(|| {
                    info!("No persisted state found, creating default app");
                    CompEditApp::default()
                });

            // CLI overrides the restored session
            if let Some(name) = &args.new_structure {
                let packing = if args.unaligned {
                    Packing::Unaligned
                } else {
                    Packing::Aligned
                };
                app.composite = Some(Composite::new(
                    name.clone(),
                    CompositeKind::Structure,
                    packing,
                ));
                app.composite_path = None;
            } else if let Some(path) = &args.file_path {
                info!("Opening composite from CLI: {}", path.display());
                app.open_composite(path.clone());
                // Keep the session-restore pass from clobbering the CLI file
                app.composite = None;
            }
            app.path_config = path_config.clone();

            Ok(Box::new(app))
        }),
    )?;

    Ok(())
}

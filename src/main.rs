#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use bitmap_paint::{BitmapFont, Config, PaintApp, PaintError, PaintResult, Session};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run() {
        log::error!("{err}");
        std::process::exit(1);
    }
}

fn run() -> PaintResult<()> {
    let config = Config::load()?;
    let font = BitmapFont::from_path(
        &config.font_path,
        config.font_width,
        config.font_height,
        config.font_colorkey_color(),
    )?;

    let size = [config.screen_width as f32, config.screen_height as f32];
    let window_size = [size[0] * config.window_scale, size[1] * config.window_scale];
    let session = Session::new(config, font)?;

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Bitmap Paint")
            .with_inner_size(window_size)
            .with_min_inner_size(size),
        ..Default::default()
    };

    eframe::run_native(
        "bitmap_paint",
        native_options,
        Box::new(move |cc| Ok(Box::new(PaintApp::new(cc, session)))),
    )
    .map_err(|err| PaintError::Window(err.to_string()))
}

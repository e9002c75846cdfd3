use std::io::{self, IsTerminal, Read};
use std::path::Path;

use anyhow::Result;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "wh-reader-rust",
    version,
    about = "Read W/H measurements from a screenshot and convert them to cm"
)]
struct Cli {
    /// Screenshot image file (PNG/JPEG/WEBP/BMP); reads stdin when omitted
    #[arg(short = 'd', long = "data")]
    data: Option<String>,

    /// Mime type for --data (auto, image/*, png, jpg, webp, bmp)
    #[arg(short = 'M', long = "data-mime")]
    data_mime: Option<String>,

    /// Show the raw OCR text after the result
    #[arg(long = "show-ocr")]
    show_ocr: bool,

    /// OCR languages passed to tesseract (e.g. eng, eng+jpn)
    #[arg(short = 'l', long = "ocr-lang")]
    ocr_lang: Option<String>,

    /// Show installed tesseract languages and exit
    #[arg(long = "show-ocr-languages")]
    show_ocr_languages: bool,

    /// Read extra settings from a local TOML file
    #[arg(short = 'r', long = "read-settings")]
    read_settings: Option<String>,

    /// Run the single-page server instead of a one-shot scan
    #[arg(long = "serve")]
    serve: bool,

    /// Server bind address (overrides settings)
    #[arg(long = "listen")]
    listen: Option<String>,

    /// Enable verbose logging
    #[arg(long = "verbose")]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    wh_reader_rust::logging::init(cli.verbose)?;

    if cli.serve {
        let settings_path = cli.read_settings.as_deref().map(Path::new);
        let settings = wh_reader_rust::settings::load_settings(settings_path)?;
        let addr = cli
            .listen
            .clone()
            .unwrap_or_else(|| settings.server_listen.clone());
        return wh_reader_rust::server::run_server(settings, addr).await;
    }

    let needs_input = cli.data.is_none() && !cli.show_ocr_languages;
    let stdin_bytes = if needs_input && !io::stdin().is_terminal() {
        let mut buffer = Vec::new();
        io::stdin().read_to_end(&mut buffer)?;
        Some(buffer)
    } else {
        None
    };

    let output = wh_reader_rust::run(
        wh_reader_rust::Config {
            data: cli.data,
            data_mime: cli.data_mime,
            ocr_lang: cli.ocr_lang,
            show_ocr: cli.show_ocr,
            show_ocr_languages: cli.show_ocr_languages,
            settings_path: cli.read_settings,
        },
        stdin_bytes,
    )?;

    println!("{}", output);
    Ok(())
}

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Lichtsatz CLI — turn a photo into a single-page PDF, optionally extracting
// its text first.
//
// This binary is the failure boundary: every error is printed as a short
// human-readable message, and a recognition failure is a notice rather than
// an exit — the PDF is still created without text.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use lichtsatz_core::human_errors::{describe_engine_failure, humanize_error};
use lichtsatz_core::{AppConfig, DOCUMENT_FILENAME, DocumentOptions, LichtsatzError, PageSize};
use lichtsatz_document::pipeline::create_document;
use lichtsatz_document::recognize::RecognitionAdapter;
use lichtsatz_document::UploadedPhoto;

#[derive(Debug, Parser)]
#[command(
    name = "lichtsatz",
    version,
    about = "Compose a photo and its recognised text into a single-page PDF"
)]
struct Args {
    /// Photo to process (PNG or JPEG).
    image: PathBuf,

    /// Output page size ("a4" or "letter").
    #[arg(long, value_parser = parse_page_size)]
    page_size: Option<PageSize>,

    /// Do not place the photo on the page.
    #[arg(long)]
    no_photo: bool,

    /// Do not run text recognition.
    #[arg(long)]
    no_text: bool,

    /// Recognition language (tesseract language code).
    #[arg(long)]
    lang: Option<String>,

    /// Directory containing the fallback engine's model files.
    #[arg(long)]
    model_dir: Option<PathBuf>,

    /// JSON settings file providing defaults for the options above.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where to write the PDF.
    #[arg(short, long, default_value = DOCUMENT_FILENAME)]
    output: PathBuf,

    /// Print the extracted text to stdout.
    #[arg(long)]
    show_text: bool,
}

/// Page size selection is exhaustive; anything unknown is rejected here,
/// before a request is ever built.
fn parse_page_size(s: &str) -> Result<PageSize, String> {
    s.parse::<PageSize>().map_err(|err| err.to_string())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Lichtsatz starting");

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<LichtsatzError>() {
                Some(lichtsatz_err) => {
                    let human = humanize_error(lichtsatz_err);
                    eprintln!("{}", human.message);
                    eprintln!("{}", human.suggestion);
                }
                None => eprintln!("Error: {err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => AppConfig::default(),
    };

    // Command-line flags override the settings file.
    if let Some(lang) = &args.lang {
        config.ocr_language = lang.clone();
    }
    if let Some(dir) = &args.model_dir {
        config.ocr_model_dir = Some(dir.clone());
    }

    let options = DocumentOptions {
        page_size: args.page_size.unwrap_or(config.default_page_size),
        include_photo: !args.no_photo && config.include_photo,
        extract_text: !args.no_text && config.extract_text,
    };

    let photo = UploadedPhoto::open(&args.image)?;
    let adapter = RecognitionAdapter::from_config(&config);

    let outcome = create_document(Some(&photo), &options, &adapter)?;

    if let Some(failure) = &outcome.recognition_failure {
        let human = humanize_error(&LichtsatzError::Recognition(failure.clone()));
        eprintln!(
            "{} (tesseract: {}; ocrs: {})",
            human.message,
            describe_engine_failure(&failure.primary),
            describe_engine_failure(&failure.fallback)
        );
        eprintln!("{}", human.suggestion);
    }

    if args.show_text && !outcome.extracted_text.is_empty() {
        println!("{}", outcome.extracted_text);
    }

    std::fs::write(&args.output, &outcome.document.bytes)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    eprintln!(
        "PDF created: {} ({} bytes, sha256 {})",
        args.output.display(),
        outcome.document.len(),
        &outcome.document.sha256[..12]
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn page_size_is_rejected_at_the_boundary() {
        assert!(parse_page_size("a4").is_ok());
        assert!(parse_page_size("LETTER").is_ok());
        assert!(parse_page_size("tabloid").is_err());
    }
}

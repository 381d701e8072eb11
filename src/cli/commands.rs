use crate::cli::args::{Cli, Commands};
use crate::error::{ProcessingError, Result};
use crate::models::{LayoutKind, LayoutSelection, Preview, TableSummary};
use crate::processors::{ConversionSession, DetectedColumns};
use crate::settings::Settings;
use crate::utils::progress::ProgressReporter;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Serialize)]
struct InspectReport {
    summary: TableSummary,
    detected: DetectedColumns,
    preview: Preview,
}

#[derive(Serialize)]
struct ConvertReport {
    summary: TableSummary,
    source: LayoutSelection,
    target: LayoutKind,
    preview: Preview,
    output: Option<PathBuf>,
}

pub async fn run(cli: Cli) -> Result<()> {
    let settings = Settings::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Inspect {
            input,
            preview,
            json,
        } => {
            let progress = ProgressReporter::new_spinner("Reading CSV...", cli.quiet || json);
            let session = load_session(&input, &settings, &progress).await?;
            progress.finish_and_clear();

            let rows = preview.unwrap_or(settings.preview_rows);
            let report = InspectReport {
                summary: session.summary().ok_or(ProcessingError::NoTableLoaded)?,
                detected: session.detected_columns().cloned().unwrap_or_default(),
                preview: session
                    .source_preview(rows)
                    .ok_or(ProcessingError::NoTableLoaded)?,
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
                return Ok(());
            }

            println!("{}", report.summary.summary());
            println!(
                "Detected latitude column: {}",
                report.detected.lat.as_deref().unwrap_or("-")
            );
            println!(
                "Detected longitude column: {}",
                report.detected.lon.as_deref().unwrap_or("-")
            );
            println!("\nData preview:\n{}", report.preview.summary());
        }

        Commands::Convert {
            input,
            from,
            to,
            column,
            lat,
            lon,
            output,
            output_dir,
            preview,
            json,
            dry_run,
        } => {
            let progress = ProgressReporter::new_spinner("Reading CSV...", cli.quiet || json);
            let mut session = load_session(&input, &settings, &progress).await?;

            let selection = match from {
                LayoutKind::OneColumn => {
                    if lat.is_some() || lon.is_some() {
                        tracing::warn!("--lat/--lon are ignored for a one-column source");
                    }
                    LayoutSelection::OneColumn { column }
                }
                LayoutKind::TwoColumn => {
                    if column.is_some() {
                        tracing::warn!("--column is ignored for a two-column source");
                    }
                    LayoutSelection::TwoColumn { lat, lon }
                }
            };
            session.set_source_layout(selection.clone());
            session.set_target_layout(to);

            progress.set_message("Converting...");
            session.convert()?;

            let written = if dry_run {
                None
            } else {
                progress.set_message("Writing CSV...");
                let exported = session.export_result()?;
                let path = match (output, output_dir.or_else(|| settings.output_dir.clone())) {
                    (Some(path), _) => path,
                    (None, Some(dir)) => dir.join(&exported.file_name),
                    (None, None) => input
                        .parent()
                        .unwrap_or_else(|| Path::new(""))
                        .join(&exported.file_name),
                };

                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    tokio::fs::create_dir_all(parent).await?;
                }
                tokio::fs::write(&path, exported.content.as_bytes()).await?;
                tracing::info!(path = %path.display(), "wrote converted file");
                Some(path)
            };
            progress.finish_and_clear();

            let rows = preview.unwrap_or(settings.preview_rows);
            let report = ConvertReport {
                summary: session.summary().ok_or(ProcessingError::NoTableLoaded)?,
                source: selection,
                target: to,
                preview: session
                    .result_preview(rows)
                    .ok_or(ProcessingError::NoResultToExport)?,
                output: written,
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
                return Ok(());
            }

            println!(
                "Converted {} rows: {} -> {}",
                report.summary.row_count,
                from,
                to
            );
            println!("\nConverted preview:\n{}", report.preview.summary());
            match report.output {
                Some(path) => println!("\nSaved to {}", path.display()),
                None => println!("\nDry run - no output file written"),
            }
        }
    }

    Ok(())
}

/// Read and parse the input file into a fresh session.
async fn load_session(
    input: &Path,
    settings: &Settings,
    progress: &ProgressReporter,
) -> Result<ConversionSession> {
    let bytes = tokio::fs::read(input).await?;
    progress.set_message("Parsing CSV...");
    let table = settings.csv_reader()?.parse_bytes(&bytes)?;

    let file_name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut session = ConversionSession::new();
    session.load(file_name, table)?;
    Ok(session)
}

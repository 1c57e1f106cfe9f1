//! Extract command implementation.

use super::display_name;
use crate::cli::ExtractArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use folio_extractor::{Extractor, ExtractorConfig, IngestRequest};
use tracing::debug;

/// Execute the extract command.
///
/// A fallback result is still printed; only the size precondition and I/O
/// failures are errors.
pub async fn execute_extract(
    args: ExtractArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let extractor_config = effective_config(&args, config)?;
    let extractor = Extractor::for_pdf(extractor_config);

    let file_size = tokio::fs::metadata(&args.file).await?.len();
    extractor.preflight(file_size)?;

    let bytes = tokio::fs::read(&args.file).await?;
    let file_name = display_name(&args.file);
    debug!("Read {} bytes from {}", bytes.len(), args.file.display());

    let request = IngestRequest::new(bytes, file_name).with_declared_size(file_size);
    let result = extractor.ingest(request).await;

    if let Some(reason) = result.fallback_reason() {
        eprintln!(
            "{}",
            formatter.warning(&format!("Extraction failed, showing diagnostic report: {}", reason))
        );
    }

    let rendered = formatter.format_result(&result)?;
    match args.output {
        Some(path) => {
            tokio::fs::write(&path, rendered).await?;
            println!("{}", formatter.success(&format!("Wrote result to {}", path.display())));
        }
        None => println!("{}", rendered),
    }

    Ok(())
}

/// Configured limits with command-line overrides applied
fn effective_config(args: &ExtractArgs, config: &Config) -> Result<ExtractorConfig> {
    let mut extractor_config = config.extractor.clone();

    if let Some(max_pages) = args.max_pages {
        extractor_config.max_pages = max_pages;
    }
    if let Some(batch_size) = args.batch_size {
        extractor_config.batch_size = batch_size;
    }

    extractor_config.validate()?;
    Ok(extractor_config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use crate::error::CliError;
    use folio_extractor::ExtractorError;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn args(file: PathBuf, output: Option<PathBuf>) -> ExtractArgs {
        ExtractArgs {
            file,
            max_pages: None,
            batch_size: None,
            output,
        }
    }

    #[test]
    fn test_overrides_applied() {
        let args = ExtractArgs {
            max_pages: Some(7),
            batch_size: Some(2),
            ..args(PathBuf::from("x.pdf"), None)
        };
        let config = effective_config(&args, &Config::default()).unwrap();
        assert_eq!(config.max_pages, 7);
        assert_eq!(config.batch_size, 2);
    }

    #[test]
    fn test_zero_override_rejected() {
        let args = ExtractArgs {
            batch_size: Some(0),
            ..args(PathBuf::from("x.pdf"), None)
        };
        assert!(effective_config(&args, &Config::default()).is_err());
    }

    #[tokio::test]
    async fn test_corrupt_file_writes_fallback() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("broken.pdf");
        let output = dir.path().join("result.json");
        std::fs::write(&input, b"This is not a valid PDF file").unwrap();

        let formatter = Formatter::new(OutputFormat::Json, false);
        execute_extract(args(input, Some(output.clone())), &Config::default(), &formatter)
            .await
            .unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(written["status"], "fallback");
        assert_eq!(written["document"]["metadata"]["fileName"], "broken.pdf");
        assert_eq!(written["document"]["structure"]["sections"][0], "Error Report");
    }

    #[tokio::test]
    async fn test_oversize_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("big.pdf");
        std::fs::write(&input, vec![b'x'; 64]).unwrap();

        let mut config = Config::default();
        config.extractor.max_file_size_bytes = 16;
        let formatter = Formatter::new(OutputFormat::Table, false);

        let result = execute_extract(args(input, None), &config, &formatter).await;
        assert!(matches!(
            result,
            Err(CliError::Extractor(ExtractorError::FileTooLarge { size: 64, max: 16 }))
        ));
    }

    #[tokio::test]
    async fn test_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let formatter = Formatter::new(OutputFormat::Table, false);
        let result = execute_extract(
            args(dir.path().join("absent.pdf"), None),
            &Config::default(),
            &formatter,
        )
        .await;
        assert!(matches!(result, Err(CliError::Io(_))));
    }
}

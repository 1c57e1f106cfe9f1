//! Check command implementation.

use super::display_name;
use crate::cli::CheckArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use folio_extractor::{Extractor, IngestRequest};

/// Execute the check command.
///
/// Runs the size precondition and opens the document without extracting text.
pub async fn execute_check(args: CheckArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let extractor = Extractor::for_pdf(config.extractor.clone());

    let file_size = tokio::fs::metadata(&args.file).await?.len();
    extractor.preflight(file_size)?;

    let bytes = tokio::fs::read(&args.file).await?;
    let file_name = display_name(&args.file);
    let page_count = extractor
        .probe(IngestRequest::new(bytes, file_name.clone()).with_declared_size(file_size))
        .await?;

    println!("{}", formatter.check_report(&file_name, file_size, page_count));
    if page_count > config.extractor.max_pages {
        println!(
            "{}",
            formatter.info(&format!(
                "Only the first {} pages will be extracted",
                config.extractor.max_pages
            ))
        );
    }

    Ok(())
}

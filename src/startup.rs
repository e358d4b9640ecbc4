use std::path::Path;

use anyhow::Result;

use crate::{
    configuration::Settings,
    dal::job_store,
    services::{scan_jobs, BraveSearcher, HttpOpenChecker, PostingChecker},
};

/// One full scan: search, filter, verify, then merge into the output file.
/// Returns the number of entries in the file afterwards.
pub async fn run(settings: &Settings) -> Result<usize> {
    let searcher = BraveSearcher::new(&settings.search)?;
    let checker = match settings.verification.enabled {
        true => Some(HttpOpenChecker::new(&settings.verification)?),
        false => {
            log::info!("Open check disabled, keeping all relevant postings");
            None
        }
    };

    let current = scan_jobs(
        &searcher,
        checker.as_ref().map(|c| c as &dyn PostingChecker),
        settings,
    )
    .await?;
    log::info!("Scan produced {} postings", current.len());

    let output_path = Path::new(&settings.application.output_path);
    let prior = job_store::load_jobs(output_path);
    log::info!("Loaded {} previous postings", prior.len());

    let merged = job_store::merge_jobs(prior, current);
    job_store::save_jobs(output_path, &merged)?;
    log::info!("Wrote {} postings to {}", merged.len(), output_path.display());

    Ok(merged.len())
}

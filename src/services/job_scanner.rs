use std::{collections::HashSet, time::Duration};

use anyhow::Result;

use crate::{
    configuration::Settings,
    domain::job_entry::{JobEntry, Provenance},
};

use super::{PostingChecker, WebSearcher};

pub fn is_relevant(url: &str, allowed_sites: &[String]) -> bool {
    allowed_sites.iter().any(|site| url.contains(site.as_str()))
}

/// Runs every configured keyword through the searcher and keeps the hits that
/// pass the site allow-list, have not been seen earlier in this run and, when a
/// checker is given, are still open.
///
/// A failed search aborts the whole scan. A failed open check only rejects
/// that one candidate.
pub async fn scan_jobs(
    searcher: &dyn WebSearcher,
    checker: Option<&dyn PostingChecker>,
    settings: &Settings,
) -> Result<Vec<JobEntry>> {
    let provenance = match checker {
        Some(_) => Provenance::VerifiedOpen,
        None => Provenance::Indexed,
    };
    let delay = Duration::from_millis(settings.application.delay_ms);

    let mut entries = vec![];
    let mut seen = HashSet::new();

    for keyword in settings.search.keywords.iter() {
        let results = searcher.search(keyword, settings.search.result_count).await?;
        let mut accepted = 0;

        for result in results {
            if !is_relevant(&result.url, &settings.filter.allowed_sites) {
                log::debug!("Skipping irrelevant url: {}", result.url);
                continue;
            }

            if !seen.insert((result.title.clone(), result.url.clone())) {
                log::debug!("Already seen this run: {}", result.url);
                continue;
            }

            if let Some(checker) = checker {
                let status = checker.check(&result.url).await;
                if !status.is_open() {
                    log::warn!("Rejecting {} as {:?}", result.url, status);
                    continue;
                }
            }

            entries.push(JobEntry::from_search_result(
                result,
                &settings.application.center,
                provenance,
            ));
            accepted += 1;

            tokio::time::sleep(delay).await;
        }

        log::info!("Accepted {} postings for '{}'", accepted, keyword);
    }

    Ok(entries)
}

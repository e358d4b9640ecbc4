use std::{collections::HashMap, fs, io::ErrorKind, path::Path};

use anyhow::{Context, Result};

use crate::domain::job_entry::{JobEntry, JobKey, RawJobEntry};

/// Reads the collection written by a previous run. A missing file or one that is
/// not a JSON array is treated as an empty collection. Inside the array, only
/// records without a usable role and url are dropped.
pub fn load_jobs(path: &Path) -> Vec<JobEntry> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::info!("No previous results at {}", path.display());
            return vec![];
        }
        Err(e) => {
            log::warn!("Could not read {}, starting empty: {:?}", path.display(), e);
            return vec![];
        }
    };

    match serde_json::from_str::<Vec<serde_json::Value>>(&content) {
        Ok(records) => {
            let total = records.len();
            let jobs: Vec<JobEntry> = records
                .into_iter()
                .filter_map(|record| serde_json::from_value::<RawJobEntry>(record).ok())
                .filter_map(JobEntry::from_raw)
                .collect();

            if jobs.len() < total {
                log::warn!(
                    "Dropped {} records without role or url from {}",
                    total - jobs.len(),
                    path.display()
                );
            }
            jobs
        }
        Err(e) => {
            log::warn!(
                "Discarding unparsable results in {}: {:?}",
                path.display(),
                e
            );
            vec![]
        }
    }
}

/// Later entries replace earlier ones with the same role and url. Each key
/// keeps the position it was first seen at.
pub fn merge_jobs(prior: Vec<JobEntry>, current: Vec<JobEntry>) -> Vec<JobEntry> {
    let mut positions: HashMap<JobKey, usize> = HashMap::new();
    let mut merged: Vec<JobEntry> = vec![];

    for job in prior.into_iter().chain(current) {
        let key = job.key();
        match positions.get(&key).copied() {
            Some(i) => merged[i] = job,
            None => {
                positions.insert(key, merged.len());
                merged.push(job);
            }
        }
    }

    merged
}

pub fn save_jobs(path: &Path, jobs: &[JobEntry]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let json = serde_json::to_string_pretty(jobs).context("Failed to serialize job entries")?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(())
}

//! Hand-curated fallback postings. Each links to a public job-search results page,
//! so the list stays useful when every external source comes back empty.

use crate::jobs::models::RawPosting;

struct BackupJob {
    source: &'static str,
    title: &'static str,
    company: &'static str,
    location: &'static str,
    url: &'static str,
    description: &'static str,
}

const BACKUP_JOBS: [BackupJob; 8] = [
    BackupJob {
        source: "linkedin",
        title: "Senior Data Scientist",
        company: "Multiple Companies",
        location: "United States / Remote",
        url: "https://www.linkedin.com/jobs/search/?keywords=Senior%20Data%20Scientist&location=United%20States&f_TPR=r86400",
        description: "Find real Senior Data Scientist positions on LinkedIn Jobs. Updated daily with thousands of listings.",
    },
    BackupJob {
        source: "indeed",
        title: "Machine Learning Engineer",
        company: "Multiple Companies",
        location: "United States / Remote",
        url: "https://www.indeed.com/jobs?q=Machine+Learning+Engineer&l=United+States&fromage=1",
        description: "Browse real Machine Learning Engineer jobs on Indeed. New positions posted hourly.",
    },
    BackupJob {
        source: "glassdoor",
        title: "Data Scientist",
        company: "Multiple Companies",
        location: "United States / Remote",
        url: "https://www.glassdoor.com/Job/jobs.htm?sc.keyword=Data%20Scientist&locT=C&locId=1",
        description: "Explore Data Scientist opportunities on Glassdoor with company reviews and salary insights.",
    },
    BackupJob {
        source: "linkedin",
        title: "AI Research Scientist",
        company: "Multiple Companies",
        location: "United States / Remote",
        url: "https://www.linkedin.com/jobs/search/?keywords=AI%20Research%20Scientist&location=United%20States&f_TPR=r86400",
        description: "Discover cutting-edge AI Research Scientist roles at top tech companies and research labs.",
    },
    BackupJob {
        source: "indeed",
        title: "Data Science Manager",
        company: "Multiple Companies",
        location: "United States / Remote",
        url: "https://www.indeed.com/jobs?q=Data+Science+Manager&l=United+States&fromage=1",
        description: "Find leadership positions in data science management with competitive salaries.",
    },
    BackupJob {
        source: "built_in",
        title: "Senior ML Engineer",
        company: "Tech Startups",
        location: "United States / Remote",
        url: "https://www.builtinafrica.com/jobs?keywords=Senior%20ML%20Engineer",
        description: "Explore ML Engineer positions at innovative tech startups and established companies.",
    },
    BackupJob {
        source: "angel_list",
        title: "Data Scientist - Remote",
        company: "Startups & Remote Companies",
        location: "Remote",
        url: "https://angel.co/job-browser/data-scientist-remote-jobs",
        description: "Find remote Data Scientist positions at startups and remote-first companies.",
    },
    BackupJob {
        source: "hired",
        title: "Data Analyst & Scientist",
        company: "Top Tech Companies",
        location: "United States / Remote",
        url: "https://hired.com/jobs/data-scientist",
        description: "Get matched with top companies looking for Data Analysts and Scientists.",
    },
];

/// The first `limit` backup postings, as raw records.
pub fn backup_jobs(limit: usize) -> Vec<RawPosting> {
    BACKUP_JOBS
        .iter()
        .take(limit)
        .map(|job| {
            [
                ("source", job.source),
                ("title", job.title),
                ("company", job.company),
                ("location", job.location),
                ("url", job.url),
                ("description", job.description),
            ]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::models::is_valid;
    use std::collections::HashSet;

    #[test]
    fn test_backup_truncated_to_limit() {
        assert_eq!(backup_jobs(3).len(), 3);
        assert_eq!(backup_jobs(100).len(), BACKUP_JOBS.len());
        assert!(backup_jobs(0).is_empty());
    }

    #[test]
    fn test_backup_records_are_valid_with_distinct_urls() {
        let jobs = backup_jobs(BACKUP_JOBS.len());
        assert!(jobs.iter().all(is_valid));
        let urls: HashSet<&String> = jobs.iter().map(|j| &j["url"]).collect();
        assert_eq!(urls.len(), jobs.len());
    }
}

//! Job posting results and CSV export.

use std::io;

use serde::{Deserialize, Serialize};

/// Substring that marks a job-detail link on the board.
pub const JOB_VIEW_MARKER: &str = "linkedin.com/jobs/view/";

/// A URL is a valid job posting iff it points at a job-detail view.
pub fn is_job_view_url(url: &str) -> bool {
    url.contains(JOB_VIEW_MARKER)
}

/// One scraped job posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPosting {
    /// Job-detail URL.
    #[serde(rename = "Job URL")]
    pub url: String,
}

impl JobPosting {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// Ordered table of scraped job postings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobTable {
    postings: Vec<JobPosting>,
}

impl JobTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, posting: JobPosting) {
        self.postings.push(posting);
    }

    pub fn len(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &JobPosting> {
        self.postings.iter()
    }

    /// Write the table as CSV (header row included, one row per posting).
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        // serialize() only emits the header alongside the first record, so
        // an empty table needs it written explicitly.
        if self.postings.is_empty() {
            csv_writer.write_record(["Job URL"])?;
        }
        for posting in &self.postings {
            csv_writer.serialize(posting)?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// Serialize the table to a CSV string.
    pub fn to_csv_string(&self) -> anyhow::Result<String> {
        let mut buf = Vec::new();
        self.write_csv(&mut buf)?;
        Ok(String::from_utf8(buf)?)
    }

    /// Read a table back from CSV produced by [`write_csv`](Self::write_csv).
    pub fn read_csv<R: io::Read>(reader: R) -> Result<Self, csv::Error> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut table = Self::new();
        for record in csv_reader.deserialize() {
            table.push(record?);
        }
        Ok(table)
    }
}

impl FromIterator<JobPosting> for JobTable {
    fn from_iter<I: IntoIterator<Item = JobPosting>>(iter: I) -> Self {
        Self {
            postings: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_view_urls_are_accepted() {
        assert!(is_job_view_url("https://www.linkedin.com/jobs/view/12345"));
        assert!(is_job_view_url(
            "https://www.linkedin.com/jobs/view/12345/?refId=abc"
        ));
    }

    #[test]
    fn non_view_urls_are_rejected() {
        assert!(!is_job_view_url("https://www.linkedin.com/jobs/search/?x=1"));
        assert!(!is_job_view_url("URL not found"));
        assert!(!is_job_view_url(""));
    }

    #[test]
    fn csv_round_trip_preserves_order() {
        let table: JobTable = (1..=3)
            .map(|i| JobPosting::new(format!("https://www.linkedin.com/jobs/view/{}", i)))
            .collect();

        let csv = table.to_csv_string().unwrap();
        // Header plus one line per row.
        assert_eq!(csv.trim_end().lines().count(), 4);
        assert!(csv.starts_with("Job URL"));

        let restored = JobTable::read_csv(csv.as_bytes()).unwrap();
        assert_eq!(restored, table);
    }

    #[test]
    fn empty_table_serializes_header_only() {
        let csv = JobTable::new().to_csv_string().unwrap();
        assert_eq!(csv.trim_end(), "Job URL");

        let restored = JobTable::read_csv(csv.as_bytes()).unwrap();
        assert!(restored.is_empty());
    }
}

use crate::airline::{load_airlines, AirlineRecord};
use crate::error::LogoError;
use crate::report::write_tally;
use crate::utils::files::ensure_directory;
use crate::utils::http::{build_client, logo_url};
use indicatif::ProgressBar;
use reqwest::StatusCode;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

/// Settings for one download run.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub metadata: PathBuf,
    pub output_dir: PathBuf,
    /// Remote URL with an `{iata}` placeholder.
    pub url_template: String,
    pub timeout: Duration,
}

/// Counters accumulated over one download run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FetchReport {
    pub total: usize,
    pub downloaded: usize,
    pub skipped_existing: usize,
    /// Records without a usable IATA code.
    pub skipped_invalid: usize,
    /// Non-200 responses and transport failures.
    pub failed: usize,
}

impl FetchReport {
    pub fn skipped_invalid_or_error(&self) -> usize {
        self.skipped_invalid + self.failed
    }

    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Downloaded => self.downloaded += 1,
            Outcome::Existing => self.skipped_existing += 1,
            Outcome::Invalid => self.skipped_invalid += 1,
            Outcome::Failed => self.failed += 1,
        }
    }
}

impl fmt::Display for FetchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_tally(
            f,
            "Download Report",
            &[
                ("✅ New images downloaded", self.downloaded),
                ("👍 Skipped (already existed)", self.skipped_existing),
                (
                    "⚠️ Skipped (invalid IATA or error)",
                    self.skipped_invalid_or_error(),
                ),
            ],
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Downloaded,
    Existing,
    Invalid,
    Failed,
}

/// Download one logo per airline with a valid IATA code into the output
/// directory, leaving files that already exist untouched.
pub async fn fetch_logos(config: &FetchConfig, pb: &ProgressBar) -> Result<FetchReport, LogoError> {
    ensure_directory(&config.output_dir)?;
    println!("📁 Directory '{}' is ready.", config.output_dir.display());

    let airlines = load_airlines(&config.metadata)?;
    let client = build_client(config.timeout)?;

    let mut report = FetchReport {
        total: airlines.len(),
        ..Default::default()
    };

    println!("\n✈️  Starting download for {} airlines...", airlines.len());
    pb.set_length(airlines.len() as u64);

    for airline in &airlines {
        let outcome = fetch_one(&client, config, airline).await?;
        report.record(outcome);
        pb.inc(1);
    }

    pb.finish();
    Ok(report)
}

async fn fetch_one(
    client: &reqwest::Client,
    config: &FetchConfig,
    airline: &AirlineRecord,
) -> Result<Outcome, LogoError> {
    let Some(iata) = airline.valid_iata() else {
        debug!(iata = ?airline.iata, "skipping record without a valid IATA code");
        return Ok(Outcome::Invalid);
    };

    let file_path = config.output_dir.join(iata.logo_file_name());
    if file_path.exists() {
        return Ok(Outcome::Existing);
    }

    let url = logo_url(&config.url_template, &iata);
    let response = match client.get(&url).send().await {
        Ok(response) => response,
        Err(e) => {
            debug!(%iata, %url, error = %e, "request failed");
            return Ok(Outcome::Failed);
        }
    };

    if response.status() != StatusCode::OK {
        debug!(%iata, %url, status = %response.status(), "logo not available");
        return Ok(Outcome::Failed);
    }

    let bytes = match response.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => {
            debug!(%iata, %url, error = %e, "failed to read response body");
            return Ok(Outcome::Failed);
        }
    };

    // Stored as-is; the payload is never inspected.
    tokio::fs::write(&file_path, &bytes).await?;
    Ok(Outcome::Downloaded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(dir: &Path, server: &MockServer, metadata: &str) -> FetchConfig {
        let metadata_path = dir.join("airlines.json");
        fs::write(&metadata_path, metadata).unwrap();
        FetchConfig {
            metadata: metadata_path,
            output_dir: dir.join("logos"),
            url_template: format!("{}/logos/{{iata}}.svg", server.uri()),
            timeout: Duration::from_secs(10),
        }
    }

    async fn serve(server: &MockServer, logo_path: &str, template: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path(logo_path))
            .respond_with(template)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn downloads_payload_verbatim_as_png() {
        let server = MockServer::start().await;
        serve(&server, "/logos/DL.svg", ResponseTemplate::new(200).set_body_bytes(b"<svg/>".to_vec())).await;

        let tmp = TempDir::new().unwrap();
        let config = config(tmp.path(), &server, r#"[{"iata": "DL", "icao": "DAL"}]"#);

        let report = fetch_logos(&config, &ProgressBar::hidden()).await.unwrap();

        assert_eq!(report.downloaded, 1);
        assert_eq!(report.skipped_invalid_or_error(), 0);
        assert_eq!(fs::read(tmp.path().join("logos/DL.png")).unwrap(), b"<svg/>");
    }

    #[tokio::test]
    async fn second_run_only_skips() {
        let server = MockServer::start().await;
        serve(&server, "/logos/DL.svg", ResponseTemplate::new(200).set_body_bytes(b"dl".to_vec())).await;
        serve(&server, "/logos/AA.svg", ResponseTemplate::new(200).set_body_bytes(b"aa".to_vec())).await;

        let tmp = TempDir::new().unwrap();
        let config = config(tmp.path(), &server, r#"[{"iata": "DL"}, {"iata": "AA"}]"#);

        let first = fetch_logos(&config, &ProgressBar::hidden()).await.unwrap();
        assert_eq!(first.downloaded, 2);

        let second = fetch_logos(&config, &ProgressBar::hidden()).await.unwrap();
        assert_eq!(second.downloaded, 0);
        assert_eq!(second.skipped_existing, 2);
    }

    #[tokio::test]
    async fn existing_file_is_not_overwritten() {
        let server = MockServer::start().await;
        serve(&server, "/logos/DL.svg", ResponseTemplate::new(200).set_body_bytes(b"new".to_vec())).await;

        let tmp = TempDir::new().unwrap();
        let config = config(tmp.path(), &server, r#"[{"iata": "DL"}]"#);
        fs::create_dir_all(&config.output_dir).unwrap();
        fs::write(config.output_dir.join("DL.png"), b"old").unwrap();

        let report = fetch_logos(&config, &ProgressBar::hidden()).await.unwrap();

        assert_eq!(report.skipped_existing, 1);
        assert_eq!(fs::read(config.output_dir.join("DL.png")).unwrap(), b"old");
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_iata_counts_as_invalid() {
        let server = MockServer::start().await;
        let tmp = TempDir::new().unwrap();
        let config = config(
            tmp.path(),
            &server,
            r#"[{"icao": "AAA"}, {"name": "x"}, {"iata": null}, {"iata": "\\N"}]"#,
        );
        let pb = ProgressBar::hidden();

        let report = fetch_logos(&config, &pb).await.unwrap();

        assert_eq!(report.total, 4);
        assert_eq!(report.downloaded, 0);
        assert_eq!(report.skipped_invalid, 4);
        assert_eq!(pb.position(), 4);
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn not_found_is_soft_failure() {
        let server = MockServer::start().await;
        serve(&server, "/logos/XX.svg", ResponseTemplate::new(404)).await;
        serve(&server, "/logos/DL.svg", ResponseTemplate::new(200).set_body_bytes(b"dl".to_vec())).await;

        let tmp = TempDir::new().unwrap();
        let config = config(tmp.path(), &server, r#"[{"iata": "XX"}, {"iata": "DL"}]"#);

        let report = fetch_logos(&config, &ProgressBar::hidden()).await.unwrap();

        assert_eq!(report.failed, 1);
        assert_eq!(report.downloaded, 1);
        assert!(!config.output_dir.join("XX.png").exists());
        assert!(config.output_dir.join("DL.png").exists());
    }

    #[tokio::test]
    async fn timeout_is_soft_failure() {
        let server = MockServer::start().await;
        serve(
            &server,
            "/logos/DL.svg",
            ResponseTemplate::new(200)
                .set_body_bytes(b"late".to_vec())
                .set_delay(Duration::from_secs(3)),
        )
        .await;

        let tmp = TempDir::new().unwrap();
        let mut config = config(tmp.path(), &server, r#"[{"iata": "DL"}]"#);
        config.timeout = Duration::from_millis(200);

        let report = fetch_logos(&config, &ProgressBar::hidden()).await.unwrap();

        assert_eq!(report.failed, 1);
        assert!(!config.output_dir.join("DL.png").exists());
    }

    #[tokio::test]
    async fn missing_metadata_aborts_after_creating_output() {
        let server = MockServer::start().await;
        let tmp = TempDir::new().unwrap();
        let config = FetchConfig {
            metadata: tmp.path().join("missing.json"),
            output_dir: tmp.path().join("logos"),
            url_template: format!("{}/logos/{{iata}}.svg", server.uri()),
            timeout: Duration::from_secs(10),
        };

        let err = fetch_logos(&config, &ProgressBar::hidden()).await.unwrap_err();

        assert!(matches!(err, LogoError::MetadataNotFound { .. }));
        assert!(config.output_dir.is_dir());
    }

    #[test]
    fn report_sums_invalid_and_failed() {
        let report = FetchReport {
            total: 5,
            downloaded: 1,
            skipped_existing: 1,
            skipped_invalid: 2,
            failed: 1,
        };
        let rendered = report.to_string();
        assert!(rendered.contains("✅ New images downloaded: 1"));
        assert!(rendered.contains("⚠️ Skipped (invalid IATA or error): 3"));
    }
}

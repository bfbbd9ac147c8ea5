use std::{io::BufReader, time::Instant};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::kev_sources::FetchError;

pub const SOURCE_NAME: &str = "CISA KEV";

/// Known Exploited Vulnerabilities catalog, published as a single JSON
/// document.
pub const CATALOG_URL: &str =
    "https://www.cisa.gov/sites/default/files/feeds/known_exploited_vulnerabilities.json";

pub fn fetch_catalog(url: &str) -> Result<KevCatalog, FetchError> {
    log::info!("downloading {} ...", url);

    let client = reqwest::blocking::Client::builder()
        .timeout(Some(std::time::Duration::from_secs(300)))
        .build()?;

    let res = client.get(url).send()?;

    let status = res.status();
    if !status.is_success() {
        return Err(FetchError::Status(status));
    }

    let start = Instant::now();

    let catalog: KevCatalog = serde_json::from_reader(BufReader::new(res))?;

    log::info!(
        "loaded {} KEV entries in {:?}",
        catalog.vulnerabilities.len(),
        start.elapsed()
    );

    Ok(catalog)
}

#[derive(Debug, Deserialize)]
pub struct KevCatalog {
    pub title: String,
    #[serde(rename = "catalogVersion")]
    pub catalog_version: String,
    #[serde(rename = "dateReleased")]
    pub date_released: String,
    pub count: u32,
    pub vulnerabilities: Vec<KevVulnerability>,
}

/// One catalog entry. Dates are parsed on deserialization; an entry with a
/// missing or malformed `dateAdded` rejects the whole document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KevVulnerability {
    #[serde(rename = "cveID")]
    pub cve_id: String,
    #[serde(rename = "vendorProject")]
    pub vendor_project: String,
    pub product: String,
    #[serde(rename = "vulnerabilityName")]
    pub vulnerability_name: String,
    #[serde(rename = "dateAdded")]
    pub date_added: NaiveDate,
    #[serde(rename = "shortDescription")]
    pub short_description: String,
    #[serde(rename = "requiredAction")]
    pub required_action: String,
    #[serde(rename = "dueDate", default)]
    pub due_date: Option<NaiveDate>,
    #[serde(rename = "knownRansomwareCampaignUse", default)]
    pub known_ransomware_campaign_use: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub cwes: Vec<String>,
}

// cargo test -p domain-feed --lib -- --nocapture
#[cfg(test)]
mod tests {
    use std::{fs::File, io::BufReader, path::Path};

    use super::*;

    const CATALOG_FIXTURE: &str = "src/kev_sources/cisa/fixtures/kev_subset.json";

    #[test]
    fn test_catalog_deserialization() {
        let path = Path::new(CATALOG_FIXTURE);
        let file = File::open(path);

        assert_eq!(file.is_ok(), true);

        let reader = BufReader::new(file.unwrap());

        let catalog: serde_json::Result<KevCatalog> = serde_json::from_reader(reader);

        assert_eq!(catalog.is_ok(), true);

        let catalog = catalog.unwrap();

        assert_eq!(catalog.catalog_version, "2025.08.07");
        assert_eq!(catalog.count, 6);
        assert_eq!(catalog.vulnerabilities.len(), 6);
        assert_eq!(
            catalog
                .vulnerabilities
                .iter()
                .map(|v| v.cve_id.as_str())
                .collect::<Vec<_>>(),
            vec![
                "CVE-2021-34473",
                "CVE-2023-23397",
                "CVE-2024-21412",
                "CVE-2022-26904",
                "CVE-2023-26369",
                "CVE-2024-0519",
            ]
        );
    }

    #[test]
    fn test_feed_dates_are_parsed() {
        let file = File::open(Path::new(CATALOG_FIXTURE)).unwrap();
        let catalog: KevCatalog = serde_json::from_reader(BufReader::new(file)).unwrap();

        let exchange = &catalog.vulnerabilities[0];

        assert_eq!(
            exchange.date_added,
            NaiveDate::from_ymd_opt(2021, 11, 3).unwrap()
        );
        assert_eq!(
            exchange.due_date,
            Some(NaiveDate::from_ymd_opt(2021, 11, 17).unwrap())
        );
    }

    #[test]
    fn test_camel_case_fields_are_renamed() {
        let file = File::open(Path::new(CATALOG_FIXTURE)).unwrap();
        let catalog: KevCatalog = serde_json::from_reader(BufReader::new(file)).unwrap();

        let outlook = &catalog.vulnerabilities[1];

        assert_eq!(outlook.vendor_project, "Microsoft");
        assert_eq!(outlook.product, "Office Outlook");
        assert_eq!(
            outlook.vulnerability_name,
            "Microsoft Office Outlook Privilege Escalation Vulnerability"
        );
        assert_eq!(outlook.required_action.is_empty(), false);
        assert_eq!(
            outlook.known_ransomware_campaign_use.as_deref(),
            Some("Unknown")
        );
    }

    #[test]
    fn test_record_with_unparsable_date_is_rejected() {
        let raw = r#"{
            "cveID": "CVE-2024-0001",
            "vendorProject": "Microsoft",
            "product": "Windows",
            "vulnerabilityName": "Example",
            "dateAdded": "03/11/2024",
            "shortDescription": "Example",
            "requiredAction": "Apply updates."
        }"#;

        let parsed: serde_json::Result<KevVulnerability> = serde_json::from_str(raw);

        assert_eq!(parsed.is_err(), true);
    }

    #[test]
    fn test_record_with_missing_date_is_rejected() {
        let raw = r#"{
            "cveID": "CVE-2024-0002",
            "vendorProject": "Microsoft",
            "product": "Windows",
            "vulnerabilityName": "Example",
            "shortDescription": "Example",
            "requiredAction": "Apply updates."
        }"#;

        let parsed: serde_json::Result<KevVulnerability> = serde_json::from_str(raw);

        assert_eq!(parsed.is_err(), true);
    }
}

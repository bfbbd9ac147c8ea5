use crate::kev_sources::cisa::KevVulnerability;

/// Selection and ranking rules for one report run.
///
/// Keywords are compared against lowercased record text, so they must be
/// lowercase themselves. `Default` carries the managed-workspace profile:
/// Microsoft records only, consumer hardware lines dropped, core
/// infrastructure and identity products flagged.
#[derive(Debug, Clone)]
pub struct TriageRules {
    pub vendor_keyword: String,
    pub excluded_products: Vec<String>,
    pub critical_keywords: Vec<String>,
    pub max_entries: usize,
}

impl Default for TriageRules {
    fn default() -> Self {
        Self {
            vendor_keyword: "microsoft".into(),
            excluded_products: [
                "xbox",
                "kinect",
                "hololens",
                "surface duo",
                "dynamics nav",
                "zune",
                "phone",
            ]
            .map(String::from)
            .to_vec(),
            critical_keywords: [
                "server",
                "exchange",
                "sharepoint",
                "entra",
                "active directory",
                "domain controller",
                "intune",
                "defender",
                "rdp",
                "remote desktop",
                "elevation of privilege",
            ]
            .map(String::from)
            .to_vec(),
            max_entries: 50,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TriagedVulnerability {
    pub record: KevVulnerability,
    pub critical_infra: bool,
}

/// Result of one feed run, kept distinct so the report can tell an empty
/// catalog from an unreachable one.
#[derive(Debug)]
pub enum FeedSnapshot {
    Loaded(Vec<TriagedVulnerability>),
    Unavailable(String),
}

/// Selects the records matching `rules`, newest first, at most
/// `rules.max_entries`. An excluded product drops the record even when the
/// vendor matches; the sort is stable, so records added on the same day keep
/// their feed order.
pub fn triage(rules: &TriageRules, raw: Vec<KevVulnerability>) -> Vec<TriagedVulnerability> {
    let mut selected: Vec<TriagedVulnerability> = raw
        .into_iter()
        .filter_map(|record| {
            let vendor = record.vendor_project.to_lowercase();
            if !vendor.contains(&rules.vendor_keyword) {
                return None;
            }

            let product = record.product.to_lowercase();
            if rules.excluded_products.iter().any(|k| product.contains(k)) {
                return None;
            }

            let name = record.vulnerability_name.to_lowercase();
            let critical_infra = rules
                .critical_keywords
                .iter()
                .any(|k| product.contains(k) || name.contains(k));

            Some(TriagedVulnerability {
                record,
                critical_infra,
            })
        })
        .collect();

    selected.sort_by(|a, b| b.record.date_added.cmp(&a.record.date_added));
    selected.truncate(rules.max_entries);

    selected
}

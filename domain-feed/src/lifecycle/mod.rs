use chrono::NaiveDate;

/// Support posture of a product line. Every variant maps to a fixed CSS
/// class, so the set must stay closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupportStatus {
    Ok,
    Warning,
    Critical,
}

impl SupportStatus {
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Ok => "status-ok",
            Self::Warning => "status-warning",
            Self::Critical => "status-critical",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Warning => "WARNING",
            Self::Critical => "CRITICAL",
        }
    }
}

#[derive(Debug, Clone)]
pub struct LifecycleEntry {
    pub product: String,
    pub eol: NaiveDate,
    pub status: SupportStatus,
}

impl LifecycleEntry {
    fn new(product: &str, eol: (i32, u32, u32), status: SupportStatus) -> Self {
        let (year, month, day) = eol;
        Self {
            product: product.into(),
            eol: NaiveDate::from_ymd_opt(year, month, day).expect("valid end-of-life date"),
            status,
        }
    }
}

/// The big-ticket product lines a managed-workspace operator tracks.
pub fn msp_dataset() -> Vec<LifecycleEntry> {
    vec![
        LifecycleEntry::new("Windows 10", (2025, 10, 14), SupportStatus::Warning),
        LifecycleEntry::new(
            "Windows Server 2012 / R2",
            (2023, 10, 10),
            SupportStatus::Critical,
        ),
        LifecycleEntry::new("Exchange Server 2016", (2025, 10, 14), SupportStatus::Warning),
        LifecycleEntry::new("Office 2016 / 2019", (2025, 10, 14), SupportStatus::Warning),
        LifecycleEntry::new("Windows Server 2016", (2027, 1, 12), SupportStatus::Ok),
    ]
}

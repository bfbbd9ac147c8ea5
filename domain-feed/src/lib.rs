pub mod kev_sources;
pub mod lifecycle;
pub mod triage;

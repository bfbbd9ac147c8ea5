use chrono::{DateTime, Utc};
use domain_feed::{
    lifecycle::LifecycleEntry,
    triage::{FeedSnapshot, TriagedVulnerability},
};

const NO_THREATS_PLACEHOLDER: &str = "No active threats found.";

const STYLE: &str = r#"
        body { font-family: 'Segoe UI', sans-serif; max-width: 900px; margin: 0 auto; padding: 20px; background: #f4f4f9; color: #333; }
        h1, h2 { border-bottom: 2px solid #0078d4; padding-bottom: 10px; color: #0078d4; }
        .masthead { display: flex; justify-content: space-between; align-items: center; }
        .section { margin-bottom: 40px; }

        table { width: 100%; border-collapse: collapse; background: white; box-shadow: 0 1px 3px rgba(0,0,0,0.1); }
        th, td { padding: 12px; text-align: left; border-bottom: 1px solid #eee; }
        th { background: #f8f9fa; font-weight: 600; }
        .status-critical { color: #d13438; font-weight: bold; }
        .status-warning { color: #a4262c; }
        .status-ok { color: #107c10; }

        .card { background: white; padding: 20px; margin-bottom: 15px; border-left: 5px solid #ccc; box-shadow: 0 1px 3px rgba(0,0,0,0.1); }
        .card.critical { border-left-color: #d13438; }
        .card-meta { margin-top: 10px; font-size: 0.9rem; color: #666; }
        .tag { background: #e1dfdd; padding: 2px 6px; border-radius: 4px; font-size: 0.85rem; margin-right: 10px; }
        .msp-badge { background: #d13438; color: white; font-weight: bold; }
        .feed-note { color: #a4262c; font-style: italic; }
"#;

/// Renders the whole report as one self-contained document: inline styles,
/// no external assets, servable as a plain static file.
pub fn render(
    lifecycle: &[LifecycleEntry],
    snapshot: &FeedSnapshot,
    generated_at: DateTime<Utc>,
) -> String {
    let mut html = String::new();

    html.push_str(&header(generated_at));
    html.push_str(&lifecycle_section(lifecycle));
    html.push_str(&exploitation_section(snapshot));
    html.push_str("</body>\n</html>\n");

    html
}

fn header(generated_at: DateTime<Utc>) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>MSP Threat Watch</title>
    <style>{STYLE}</style>
</head>
<body>
    <div class="masthead">
        <h1>Managed Workspace Threat Watch</h1>
        <small>Updated: {}</small>
    </div>
"#,
        generated_at.format("%Y-%m-%d %H:%M UTC")
    )
}

fn lifecycle_section(entries: &[LifecycleEntry]) -> String {
    let mut section = String::new();

    section.push_str(r#"    <div class="section">"#);
    section.push_str("\n        <h2>Upcoming End-of-Life (Major)</h2>\n");
    section.push_str("        <table>\n");
    section.push_str("            <tr><th>Product</th><th>EOL Date</th><th>Status</th></tr>\n");

    for entry in entries {
        section.push_str(&format!(
            "            <tr><td>{}</td><td>{}</td><td class=\"{}\">{}</td></tr>\n",
            html_escape(&entry.product),
            entry.eol.format("%Y-%m-%d"),
            entry.status.css_class(),
            entry.status.label(),
        ));
    }

    section.push_str("        </table>\n    </div>\n");

    section
}

fn exploitation_section(snapshot: &FeedSnapshot) -> String {
    let mut section = String::new();

    section.push_str(r#"    <div class="section">"#);
    section.push_str("\n        <h2>Active Exploitations (CISA KEV)</h2>\n");

    match snapshot {
        FeedSnapshot::Loaded(entries) if entries.is_empty() => {
            section.push_str(&format!("        <p>{NO_THREATS_PLACEHOLDER}</p>\n"));
        }
        FeedSnapshot::Loaded(entries) => {
            for entry in entries {
                section.push_str(&vulnerability_card(entry));
            }
        }
        FeedSnapshot::Unavailable(reason) => {
            section.push_str(&format!("        <p>{NO_THREATS_PLACEHOLDER}</p>\n"));
            section.push_str(&format!(
                "        <p class=\"feed-note\">Live feed unavailable: {}</p>\n",
                html_escape(reason)
            ));
        }
    }

    section.push_str("    </div>\n");

    section
}

fn vulnerability_card(entry: &TriagedVulnerability) -> String {
    let (card_class, badge) = if entry.critical_infra {
        (
            "card critical",
            r#" <span class="tag msp-badge">CRITICAL INFRA</span>"#,
        )
    } else {
        ("card", "")
    };

    let record = &entry.record;

    format!(
        r#"        <div class="{card_class}">
            <h3>{}{badge}</h3>
            <p><strong>{}</strong>: {}</p>
            <div class="card-meta">
                <span class="tag">Added: {}</span>
                <strong>Action:</strong> {}
            </div>
        </div>
"#,
        html_escape(&record.product),
        html_escape(&record.cve_id),
        html_escape(&record.short_description),
        record.date_added.format("%Y-%m-%d"),
        html_escape(&record.required_action),
    )
}

// Feed text ends up inside markup verbatim otherwise.
fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

use crate::shared::icons::icon;
use contracts::domain::common::Record;
use leptos::prelude::*;

pub fn or_dash(value: String) -> String {
    if value.is_empty() {
        "-".to_string()
    } else {
        value
    }
}

/// `57%` for a present number, `-` otherwise.
fn percent(record: &Record, field: &str) -> String {
    match record.f64_field(field) {
        Some(v) if v != 0.0 => format!("{}%", v),
        _ => "-".to_string(),
    }
}

/// Short origin tag: NAT for natural stones, LAB for the rest.
pub fn location_code(record: &Record) -> &'static str {
    if record.str_field("location") == Some("Natural") {
        "NAT"
    } else {
        "LAB"
    }
}

pub fn location_tag(record: &Record) -> AnyView {
    let code = location_code(record);
    view! {
        <span class="tag" class:tag--natural={code == "NAT"} class:tag--lab={code == "LAB"}>
            {code}
        </span>
    }
    .into_any()
}

fn detail_row(label: &'static str, value: String) -> impl IntoView {
    view! {
        <span class="details__label">{label}</span>
        <span class="details__value">{value}</span>
    }
}

/// Expansion row: measurements, grading, certificate and media links.
pub fn diamond_details(record: &Record) -> AnyView {
    let cert_url = record.display("certUrl");
    let video_url = record.display("videoUrl");
    let cert_number = record.display("certNumber");
    let cert_number = if cert_number.is_empty() {
        "N/A".to_string()
    } else {
        cert_number
    };

    view! {
        <div class="details details--three">
            <div class="details__section">
                <h4 class="details__title">"Measurements"</h4>
                <div class="details__grid">
                    {detail_row("Measurements:", or_dash(record.display("measurement")))}
                    {detail_row("Table:", percent(record, "table"))}
                    {detail_row("Depth:", percent(record, "depth"))}
                    {detail_row("Ratio:", or_dash(record.display("ratio")))}
                </div>
            </div>
            <div class="details__section">
                <h4 class="details__title">"Grading"</h4>
                <div class="details__grid">
                    {detail_row("Polish:", or_dash(record.display("polish")))}
                    {detail_row("Symmetry:", or_dash(record.display("symmetry")))}
                    {detail_row("Fluorescence:", or_dash(record.display("fluorescence")))}
                    {detail_row("Lab:", or_dash(record.display("lab")))}
                </div>
            </div>
            <div class="details__section">
                <h4 class="details__title">"Media & Cert"</h4>
                <div class="details__cert">
                    <strong>"CERT: "</strong>
                    {cert_number}
                    {(!cert_url.is_empty()).then(|| view! {
                        <a href=cert_url target="_blank" rel="noreferrer" class="details__link">
                            {icon("link")}
                            " VIEW"
                        </a>
                    })}
                </div>
                {(!video_url.is_empty()).then(|| view! {
                    <a href=video_url target="_blank" rel="noreferrer" class="details__link">
                        {icon("video")}
                        " WATCH 360° VIDEO"
                    </a>
                })}
            </div>
        </div>
    }
    .into_any()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dash_for_missing_values() {
        assert_eq!(or_dash(String::new()), "-");
        assert_eq!(or_dash("VS1".into()), "VS1");
    }

    #[test]
    fn percent_cells() {
        let r = Record::new().with("table", 57).with("depth", "61.5");
        assert_eq!(percent(&r, "table"), "57%");
        assert_eq!(percent(&r, "depth"), "61.5%");
        assert_eq!(percent(&r, "ratio"), "-");
        assert_eq!(percent(&Record::new().with("table", 0), "table"), "-");
    }

    #[test]
    fn location_codes() {
        assert_eq!(location_code(&Record::new().with("location", "Natural")), "NAT");
        assert_eq!(location_code(&Record::new().with("location", "Lab Grown")), "LAB");
    }
}

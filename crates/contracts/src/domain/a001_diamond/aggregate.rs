use crate::domain::common::{
    FieldKind, FieldOption, FieldSpec, ImportTemplate, Record, ResourceDescriptor, StatusRoute,
    StatusToggle,
};
use serde::Deserialize;
use serde_json::Value;

// ============================================================================
// Resource
// ============================================================================

/// Бриллианты: серверная пагинация, фильтры, массовая загрузка
pub const DIAMONDS: ResourceDescriptor = ResourceDescriptor {
    status: Some(StatusToggle {
        field: "active",
        route: StatusRoute::ActivateDeactivate,
        response_key: Some("diamond"),
        labelled: false,
    }),
    bulk_path: Some("bulk"),
    bulk_refetch_limit: 10,
    ..ResourceDescriptor::new("diamonds", "Diamond", "/admin/diamonds")
};

pub const FILTERS_PATH: &str = "/admin/diamonds/filters";

/// Query keys of the list filters, in display order.
pub const FILTER_KEYS: [&str; 5] = ["shape", "diamondType", "color", "clarity", "cut"];

pub const DIAMOND_TYPES: [&str; 2] = ["Natural", "Lab Grown"];

pub const IMPORT_TEMPLATE: ImportTemplate = ImportTemplate {
    filename: "diamond_upload_template.csv",
    columns: &[
        ("sku", "DIA-001"),
        ("shape", "Round"),
        ("carat", "1.0"),
        ("color", "D"),
        ("purity", "VS1"),
        ("cut", "Ex"),
        ("price", "5000"),
        ("pricePerCarat", "5000"),
        ("stock", "1"),
        ("location", "Natural"),
        ("lab", "GIA"),
        ("certNumber", "123456"),
        ("polish", "Ex"),
        ("symmetry", "Ex"),
        ("fluorescence", "None"),
        ("table", "57"),
        ("depth", "61.5"),
        ("measurement", "6.5x6.5x4.0"),
        ("imageUrl", ""),
        ("videoUrl", ""),
    ],
};

// ============================================================================
// Filter options
// ============================================================================

/// Option lists served by `GET /admin/diamonds/filters`.
///
/// Shapes are reference objects (`{_id, code, label}`), the grading lists are
/// plain strings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DiamondFilterOptions {
    #[serde(default)]
    pub shapes: Vec<Value>,
    #[serde(default)]
    pub colors: Vec<FieldOption>,
    #[serde(default)]
    pub clarities: Vec<FieldOption>,
    #[serde(default)]
    pub cuts: Vec<FieldOption>,
}

impl DiamondFilterOptions {
    /// Accepts the lists either at the top level or under `filters`.
    pub fn from_response(body: Value) -> Result<Self, serde_json::Error> {
        match body {
            Value::Object(mut map) if map.get("filters").is_some_and(Value::is_object) => {
                serde_json::from_value(map.remove("filters").unwrap_or_default())
            }
            other => serde_json::from_value(other),
        }
    }

    /// Shape filter sends the shape code, labelled `Round (RD)`.
    pub fn shape_filter_options(&self) -> Vec<FieldOption> {
        self.shapes
            .iter()
            .filter_map(|shape| match shape {
                Value::Object(map) => {
                    let code = map.get("code").and_then(Value::as_str)?;
                    let label = map.get("label").and_then(Value::as_str).unwrap_or(code);
                    Some(FieldOption::labeled(code, format!("{label} ({code})")))
                }
                Value::String(s) => Some(FieldOption::Plain(s.clone())),
                _ => None,
            })
            .collect()
    }

    /// The editor stores the shape reference id.
    pub fn shape_form_options(&self) -> Vec<FieldOption> {
        self.shapes.iter().cloned().map(FieldOption::from).collect()
    }

    pub fn options_for(&self, key: &str) -> Vec<FieldOption> {
        match key {
            "shape" => self.shape_filter_options(),
            "diamondType" => FieldOption::plain_list(&DIAMOND_TYPES),
            "color" => self.colors.clone(),
            "clarity" => self.clarities.clone(),
            "cut" => self.cuts.clone(),
            _ => Vec::new(),
        }
    }
}

pub fn filter_label(key: &str) -> &'static str {
    match key {
        "shape" => "All Shapes",
        "diamondType" => "All Types",
        "color" => "All Colors",
        "clarity" => "All Clarities",
        "cut" => "All Cuts",
        _ => "All",
    }
}

/// Shape cell text: the populated reference label, its code, or the raw value.
pub fn shape_label(record: &Record) -> String {
    match record.get("shape") {
        Some(Value::Object(map)) => map
            .get("label")
            .or_else(|| map.get("code"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        _ => record.display("shape"),
    }
}

// ============================================================================
// Editor
// ============================================================================

pub fn form_fields(filters: &DiamondFilterOptions) -> Vec<FieldSpec> {
    vec![
        FieldSpec::text("sku", "SKU").required(),
        FieldSpec::number("stock", "Stock Qty").default_value("1"),
        FieldSpec::select("location", "Type", FieldOption::plain_list(&DIAMOND_TYPES))
            .required()
            .default_value("Natural"),
        FieldSpec::select("shape", "Shape", filters.shape_form_options()).required(),
        FieldSpec::number("carat", "Carat").required(),
        FieldSpec::select("color", "Color", filters.colors.clone()),
        FieldSpec::select("purity", "Clarity", filters.clarities.clone()),
        FieldSpec::select("cut", "Cut", filters.cuts.clone()),
        FieldSpec::text("polish", "Polish"),
        FieldSpec::text("symmetry", "Symmetry"),
        FieldSpec::text("fluorescence", "Fluorescence"),
        FieldSpec::text("lab", "Lab").default_value("GIA"),
        FieldSpec::number("pricePerCarat", "Price/Ct"),
        FieldSpec::number("price", "Total Price").required(),
        FieldSpec::checkbox("available", "Available").default_value("true"),
        FieldSpec::text("imageUrl", "Image URL"),
        FieldSpec::text("videoUrl", "Video URL"),
        FieldSpec::text("certNumber", "Cert Number"),
        FieldSpec::text("certUrl", "Cert URL"),
        FieldSpec::new("comment", "Comment", FieldKind::TextArea),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::common::{ListQuery, StatusValue};
    use serde_json::json;

    fn filters() -> DiamondFilterOptions {
        DiamondFilterOptions::from_response(json!({
            "shapes": [{"_id": "s1", "code": "RD", "label": "Round"}],
            "colors": ["D", "E"],
            "clarities": ["VS1"],
            "cuts": ["Ex"]
        }))
        .unwrap()
    }

    #[test]
    fn shape_options_differ_between_filter_and_editor() {
        let f = filters();
        assert_eq!(
            f.shape_filter_options(),
            vec![FieldOption::labeled("RD", "Round (RD)")]
        );
        assert_eq!(f.shape_form_options(), vec![FieldOption::labeled("s1", "Round")]);
    }

    #[test]
    fn wrapped_filters_response() {
        let f = DiamondFilterOptions::from_response(json!({"filters": {"colors": ["F"]}})).unwrap();
        assert_eq!(f.options_for("color"), vec![FieldOption::Plain("F".into())]);
        assert_eq!(f.options_for("diamondType").len(), 2);
    }

    #[test]
    fn toggle_and_bulk_routes() {
        assert_eq!(
            DIAMONDS.status_path("d1", &StatusValue::Flag(true)).as_deref(),
            Some("/admin/diamonds/d1/activate")
        );
        assert_eq!(DIAMONDS.refetch_query(), ListQuery::new(1, 10));
    }

    #[test]
    fn shape_cell_text() {
        let populated = Record::new().with("shape", json!({"code": "OV", "label": "Oval"}));
        assert_eq!(shape_label(&populated), "Oval");
        assert_eq!(shape_label(&Record::new().with("shape", "Pear")), "Pear");
        assert_eq!(shape_label(&Record::new()), "");
    }
}

use serde::{Deserialize, Serialize};

/// Outcome of a spreadsheet import as reported by the backend.
///
/// Counters are shown as-is; per-row outcomes are never interpreted here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkImportSummary {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub created: u64,
    #[serde(default)]
    pub updated: u64,
    #[serde(default)]
    pub skipped: u64,
}

impl BulkImportSummary {
    /// Line for the notification: the backend message when present.
    pub fn summary_line(&self) -> String {
        match self.message.as_deref().map(str::trim) {
            Some(message) if !message.is_empty() => message.to_string(),
            _ => format!(
                "Import finished: {} created, {} updated, {} skipped",
                self.created, self.updated, self.skipped
            ),
        }
    }
}

/// Spreadsheet template offered next to a bulk import: column names with one
/// sample row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportTemplate {
    pub filename: &'static str,
    pub columns: &'static [(&'static str, &'static str)],
}

impl ImportTemplate {
    pub fn headers(&self) -> Vec<&'static str> {
        self.columns.iter().map(|(name, _)| *name).collect()
    }

    pub fn sample_row(&self) -> Vec<String> {
        self.columns
            .iter()
            .map(|(_, sample)| (*sample).to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_body_deserializes() {
        let summary: BulkImportSummary =
            serde_json::from_str(r#"{"message":"Processed 10 rows","created":7}"#).unwrap();
        assert_eq!(summary.created, 7);
        assert_eq!(summary.skipped, 0);
        assert_eq!(summary.summary_line(), "Processed 10 rows");
    }

    #[test]
    fn template_columns_line_up() {
        const T: ImportTemplate = ImportTemplate {
            filename: "t.csv",
            columns: &[("sku", "DIA-001"), ("carat", "1.0")],
        };
        assert_eq!(T.headers(), vec!["sku", "carat"]);
        assert_eq!(T.sample_row(), vec!["DIA-001".to_string(), "1.0".to_string()]);
    }

    #[test]
    fn counters_when_message_missing() {
        let summary = BulkImportSummary {
            message: None,
            created: 3,
            updated: 1,
            skipped: 2,
        };
        assert_eq!(
            summary.summary_line(),
            "Import finished: 3 created, 1 updated, 2 skipped"
        );
    }
}

/// Скачивание CSV, собранного в браузере (шаблоны импорта)
use contracts::domain::common::ImportTemplate;
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

const SEPARATOR: char = ',';

/// CSV text of an import template: header line plus one sample row.
pub fn template_csv(template: &ImportTemplate) -> String {
    let mut csv_content = String::new();
    push_row(&mut csv_content, template.headers().into_iter());
    let sample = template.sample_row();
    push_row(&mut csv_content, sample.iter().map(String::as_str));
    csv_content
}

fn push_row<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>) {
    let row: Vec<String> = cells.map(escape_csv_cell).collect();
    out.push_str(&row.join(&SEPARATOR.to_string()));
    out.push('\n');
}

/// Экранирует CSV ячейку если необходимо
fn escape_csv_cell(cell: &str) -> String {
    if cell.contains(SEPARATOR) || cell.contains('"') || cell.contains('\n') || cell.contains('\r')
    {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}

/// Offers the template as a file download.
pub fn download_import_template(template: &ImportTemplate) -> Result<(), String> {
    let blob = create_csv_blob(&template_csv(template))?;
    download_blob(&blob, template.filename)
}

fn create_csv_blob(content: &str) -> Result<Blob, String> {
    let array = js_sys::Array::new();
    array.push(&wasm_bindgen::JsValue::from_str(content));

    let properties = BlobPropertyBag::new();
    properties.set_type("text/csv;charset=utf-8;");

    Blob::new_with_str_sequence_and_options(&array, &properties)
        .map_err(|e| format!("Failed to create blob: {:?}", e))
}

/// Инициирует скачивание Blob через браузер
fn download_blob(blob: &Blob, filename: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("No window object")?;
    let document = window.document().ok_or("No document object")?;
    let body = document.body().ok_or("No body element")?;

    let url = Url::create_object_url_with_blob(blob)
        .map_err(|e| format!("Failed to create object URL: {:?}", e))?;

    let anchor = document
        .create_element("a")
        .map_err(|e| format!("Failed to create anchor: {:?}", e))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|e| format!("Failed to cast to anchor: {:?}", e))?;
    anchor.set_href(&url);
    anchor.set_download(filename);

    body.append_child(&anchor)
        .map_err(|e| format!("Failed to append anchor: {:?}", e))?;
    anchor.click();
    body.remove_child(&anchor)
        .map_err(|e| format!("Failed to remove anchor: {:?}", e))?;

    Url::revoke_object_url(&url).map_err(|e| format!("Failed to revoke URL: {:?}", e))?;
    log::info!("downloaded {}", filename);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEMPLATE: ImportTemplate = ImportTemplate {
        filename: "products.csv",
        columns: &[
            ("productSku", "RING-001"),
            ("title", "Solitaire, classic"),
            ("description", "Say \"yes\""),
        ],
    };

    #[test]
    fn template_has_header_and_sample() {
        let csv = template_csv(&TEMPLATE);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "productSku,title,description");
        assert_eq!(lines[1], "RING-001,\"Solitaire, classic\",\"Say \"\"yes\"\"\"");
    }

    #[test]
    fn plain_cells_are_untouched() {
        assert_eq!(escape_csv_cell("DIA-001"), "DIA-001");
        assert_eq!(escape_csv_cell("a\nb"), "\"a\nb\"");
    }
}

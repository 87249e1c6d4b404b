//! Reading a picked file before it is submitted.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use contracts::domain::common::ApiError;
use wasm_bindgen_futures::JsFuture;
use web_sys::File;

/// Reads `file` into a `data:` URL for previews.
///
/// Fails with an `Encode` error, never a transport one, so the caller can
/// tell a broken local file from a network problem.
pub async fn encode_file_as_data_url(file: &File) -> Result<String, ApiError> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| ApiError::encode(format!("Failed to read {}: {:?}", file.name(), e)))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    log::debug!("encoded {} ({} bytes)", file.name(), bytes.len());
    Ok(data_url(&file.type_(), &bytes))
}

pub fn data_url(mime: &str, bytes: &[u8]) -> String {
    let mime = if mime.is_empty() {
        "application/octet-stream"
    } else {
        mime
    };
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_url_format() {
        assert_eq!(data_url("image/png", b"abc"), "data:image/png;base64,YWJj");
        assert_eq!(
            data_url("", &[0xff]),
            "data:application/octet-stream;base64,/w=="
        );
    }
}

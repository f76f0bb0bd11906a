use base64::{engine::general_purpose, Engine as _};

use crate::error::{Result, RoastError};

/// Raw image bytes decoded from a data URI, together with the declared MIME
/// type and a synthesized upload filename. Built per request and discarded
/// after the analysis call.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub bytes: Vec<u8>,
    pub mime_type: String,
    pub filename: String,
}

/// Decodes a `data:<mime>;base64,<payload>` string into a [`DecodedImage`].
///
/// The URI must contain exactly one comma and a non-empty MIME type between
/// `:` and `;`; the filename extension is taken from the MIME subtype,
/// falling back to `bin`.
pub fn decode_data_uri(data_uri: &str) -> Result<DecodedImage> {
    let parts: Vec<&str> = data_uri.split(',').collect();
    if parts.len() != 2 {
        return Err(RoastError::Validation(
            "invalid data URI format".to_string(),
        ));
    }
    let header = parts[0];
    let payload = parts[1];

    let mime_type = header
        .split_once(':')
        .and_then(|(_, rest)| rest.split_once(';'))
        .map(|(mime, _)| mime.trim())
        .filter(|mime| !mime.is_empty())
        .ok_or_else(|| {
            RoastError::Validation("could not extract MIME type from data URI".to_string())
        })?;

    let bytes = general_purpose::STANDARD
        .decode(payload)
        .map_err(|err| RoastError::Validation(format!("invalid base64 image payload: {err}")))?;

    let extension = mime_type
        .split('/')
        .nth(1)
        .filter(|ext| !ext.is_empty())
        .unwrap_or("bin");
    let filename = format!("image.{extension}");

    Ok(DecodedImage {
        bytes,
        mime_type: mime_type.to_string(),
        filename,
    })
}

/// Sniffs a MIME type from raw bytes. HEIC/HEIF files are recognized by
/// their `ftyp` brand before falling back to `infer`.
pub fn detect_mime_type(data: &[u8]) -> Option<String> {
    if data.len() > 12 {
        let ftyp = &data[4..12];
        if ftyp.starts_with(b"ftyp") {
            let brand = &ftyp[4..8];
            if brand == b"heic" || brand == b"heif" || brand == b"hevc" {
                return Some("image/heic".to_string());
            }
        }
    }

    infer::get(data).map(|kind| kind.mime_type().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_a_png_data_uri() {
        let payload = [0x89u8, 0x50, 0x4e, 0x47];
        let encoded = general_purpose::STANDARD.encode(payload);
        let decoded = decode_data_uri(&format!("data:image/png;base64,{encoded}")).unwrap();
        assert_eq!(decoded.mime_type, "image/png");
        assert_eq!(decoded.filename, "image.png");
        assert_eq!(decoded.bytes, payload);
    }

    #[test]
    fn rejects_a_uri_without_a_comma() {
        let result = decode_data_uri("data:image/png;base64");
        assert!(matches!(result, Err(RoastError::Validation(_))));
    }

    #[test]
    fn rejects_a_uri_without_a_mime_type() {
        let result = decode_data_uri("data:;base64,AAAA");
        assert!(matches!(result, Err(RoastError::Validation(_))));
    }

    #[test]
    fn rejects_invalid_base64_payloads() {
        let result = decode_data_uri("data:image/png;base64,not base64!!");
        assert!(matches!(result, Err(RoastError::Validation(_))));
    }

    #[test]
    fn falls_back_to_bin_extension_without_a_subtype() {
        let decoded = decode_data_uri("data:image;base64,AQID");
        // "image" alone has no subtype separator, so the MIME parse still
        // succeeds but the extension falls back.
        let decoded = decoded.unwrap();
        assert_eq!(decoded.mime_type, "image");
        assert_eq!(decoded.filename, "image.bin");
    }

    #[test]
    fn sniffs_png_bytes() {
        let png_header = [
            0x89u8, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x48,
            0x44, 0x52,
        ];
        assert_eq!(detect_mime_type(&png_header).as_deref(), Some("image/png"));
    }
}

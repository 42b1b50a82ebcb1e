use base64::{engine::general_purpose::STANDARD as Base64, Engine as _};

pub fn encode_image(image: &[u8]) -> String {
    Base64.encode(image)
}

/// Surrounding whitespace is ignored; anything else outside the standard
/// alphabet is an error.
pub fn decode_image(image_data: &str) -> Result<Vec<u8>, base64::DecodeError> {
    Base64.decode(image_data.trim())
}

use std::{collections::HashMap, fmt};

/// Form field carrying the first attached media URL.
pub const IMAGE_LOCATION_FIELD: &str = "MediaUrl0";

pub const NO_IMAGE_MESSAGE: &str = "Sorry, no image was found. Please send a photo of your recipe.";
pub const FAILURE_MESSAGE: &str =
    "Sorry, something went wrong while reading your recipe. Please try again later.";
pub const NO_INGREDIENTS_MESSAGE: &str = "Sorry, no ingredients were found in that photo.";

const ENVELOPE_OPEN: &str = r#"<?xml version="1.0" encoding="UTF-8"?><Response><Message>"#;
const ENVELOPE_CLOSE: &str = "</Message></Response>";

/// A received message as delivered by the messaging gateway.
///
/// Values are kept exactly as delivered, so the media URL is still
/// URL-encoded and must be decoded through `ImageLocation::decode`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InboundEvent {
    fields: HashMap<String, String>,
}

impl InboundEvent {
    pub fn new(fields: HashMap<String, String>) -> Self {
        Self { fields }
    }

    /// Builds an event from an `application/x-www-form-urlencoded` body.
    /// Keys are decoded, values are left encoded.
    pub fn from_form_body(body: &str) -> Self {
        let fields = body
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                (decode_form_key(key), value.to_string())
            })
            .collect();

        Self { fields }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// The encoded image location, if present and non-empty.
    pub fn image_location(&self) -> Option<&str> {
        self.get(IMAGE_LOCATION_FIELD)
            .filter(|location| !location.trim().is_empty())
    }
}

impl From<HashMap<String, String>> for InboundEvent {
    fn from(fields: HashMap<String, String>) -> Self {
        Self::new(fields)
    }
}

fn decode_form_key(key: &str) -> String {
    let key = key.replace('+', " ");
    let bytes = urlencoding::decode_binary(key.as_bytes()).into_owned();
    String::from_utf8(bytes).unwrap_or_else(|e| {
        tracing::debug!(key = %key, "Form key is not valid UTF-8 once decoded");
        String::from_utf8_lossy(e.as_bytes()).into_owned()
    })
}

/// Reply rendered into the messaging provider's XML envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessagingResponse {
    body: String,
}

impl MessagingResponse {
    pub fn message(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }

    pub fn no_image() -> Self {
        Self::message(NO_IMAGE_MESSAGE)
    }

    pub fn failure() -> Self {
        Self::message(FAILURE_MESSAGE)
    }

    pub fn no_ingredients() -> Self {
        Self::message(NO_INGREDIENTS_MESSAGE)
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn to_xml(&self) -> String {
        let escaped = escape_xml(&self.body);
        let mut xml =
            String::with_capacity(ENVELOPE_OPEN.len() + escaped.len() + ENVELOPE_CLOSE.len());
        xml.push_str(ENVELOPE_OPEN);
        xml.push_str(&escaped);
        xml.push_str(ENVELOPE_CLOSE);
        xml
    }
}

impl fmt::Display for MessagingResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_xml())
    }
}

/// Escapes text for use as XML element content.
pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

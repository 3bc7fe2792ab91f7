use crate::domain::{
    common::entities::app_errors::{CoreError, ExternalService, ServiceError},
    shopping_list::{
        entities::RawText,
        value_objects::{BlockKind, OcrBlock, TaggedSpan},
    },
};

/// Joins the text of every line block, in OCR order, with a single space.
pub fn join_line_blocks(blocks: &[OcrBlock]) -> RawText {
    let lines: Vec<&str> = blocks
        .iter()
        .filter(|block| block.kind == BlockKind::Line)
        .filter_map(|block| block.text.as_deref())
        .collect();

    RawText::new(lines.join(" "))
}

/// Recovers the exact substrings of `raw_text` the ingredient model pointed
/// at, in model order.
pub fn slice_ingredient_spans(
    raw_text: &RawText,
    spans: &[TaggedSpan],
) -> Result<Vec<String>, CoreError> {
    spans
        .iter()
        .map(|span| {
            raw_text
                .slice_chars(span.start, span.end)
                .map(str::to_string)
                .ok_or_else(|| {
                    CoreError::from(ServiceError::malformed(
                        ExternalService::IngredientModel,
                        format!(
                            "span {}..{} is outside the {} character input",
                            span.start,
                            span.end,
                            raw_text.as_str().chars().count()
                        ),
                    ))
                })
        })
        .collect()
}

/// Upper-cases the first character and leaves the rest as extracted.
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

//! Rich-text fields and their plain-text rendering.

use serde::Deserialize;

/// A structured rich-text value: an ordered list of typed blocks.
///
/// The API serializes rich text as a bare JSON array, hence the transparent
/// newtype. An absent or empty field deserializes to zero blocks.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct RichText(pub Vec<RichTextBlock>);

/// One block of rich text. Span-level markup is not modelled; only the
/// plain text run is consumed.
#[derive(Debug, Clone, Deserialize)]
pub struct RichTextBlock {
    #[serde(rename = "type", default)]
    pub block_type: String,
    #[serde(default)]
    pub text: String,
}

impl RichText {
    /// Renders the value as plain text: the text runs of all blocks joined
    /// by single spaces, with markup and textless blocks (images, embeds)
    /// dropped. Zero blocks render as the empty string.
    #[must_use]
    pub fn as_text(&self) -> String {
        self.0
            .iter()
            .map(|block| block.text.as_str())
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> RichText {
        serde_json::from_str(json).expect("rich text should deserialize")
    }

    #[test]
    fn as_text_joins_blocks_with_single_spaces() {
        let rich = parse(
            r#"[
                {"type": "heading1", "text": "Camiseta", "spans": []},
                {"type": "paragraph", "text": "preta", "spans": []}
            ]"#,
        );
        assert_eq!(rich.as_text(), "Camiseta preta");
    }

    #[test]
    fn as_text_of_zero_blocks_is_empty() {
        let rich = parse("[]");
        assert_eq!(rich.as_text(), "");
    }

    #[test]
    fn as_text_skips_textless_blocks() {
        let rich = parse(
            r#"[
                {"type": "paragraph", "text": "Antes", "spans": []},
                {"type": "image", "url": "https://images.example.com/x.png"},
                {"type": "paragraph", "text": "depois", "spans": []}
            ]"#,
        );
        assert_eq!(rich.as_text(), "Antes depois");
    }

    #[test]
    fn default_is_empty() {
        assert_eq!(RichText::default().as_text(), "");
    }
}

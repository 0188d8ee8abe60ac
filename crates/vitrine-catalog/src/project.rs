//! Projection from raw content documents to the [`Product`] view model.

use vitrine_cms::Document;
use vitrine_core::Product;

/// Projects one raw document into a `Product`.
///
/// Pure: the same document always yields the same product, and nothing is
/// fetched or mutated. Rich-text fields flatten to plain text (an empty
/// value flattens to an empty string, and an empty description to `None`).
/// `price` passes through unchanged; whatever number the document carries
/// is what gets formatted, so a malformed upstream price surfaces in the
/// rendered string rather than as an error here.
#[must_use]
pub fn project(document: &Document) -> Product {
    let description = document.data.description.as_text();
    let description = if description.is_empty() {
        None
    } else {
        Some(description)
    };

    Product::new(
        document.uid.clone(),
        document.data.title.as_text(),
        document.data.price,
        description,
        document.data.image.as_ref().map(|image| image.url.clone()),
    )
}

#[cfg(test)]
mod tests {
    use vitrine_core::money::format_brl;

    use super::*;

    fn document(json: serde_json::Value) -> Document {
        serde_json::from_value(json).expect("document should deserialize")
    }

    #[test]
    fn projects_title_price_and_derived_formatting() {
        let doc = document(serde_json::json!({
            "id": "doc-1",
            "uid": "camiseta-preta",
            "type": "product",
            "data": {
                "title": [{ "type": "heading1", "text": "Camiseta preta", "spans": [] }],
                "price": 19.9
            }
        }));

        let product = project(&doc);

        assert_eq!(product.id.as_deref(), Some("camiseta-preta"));
        assert_eq!(product.title, "Camiseta preta");
        assert!((product.price - 19.9).abs() < f64::EPSILON);
        assert_eq!(product.price_formatted, "R$ 19,90");
        assert_eq!(product.price_formatted, format_brl(product.price));
    }

    #[test]
    fn empty_rich_text_projects_to_empty_title_and_no_description() {
        let doc = document(serde_json::json!({
            "id": "doc-2",
            "uid": "sem-titulo",
            "type": "product",
            "data": {
                "title": [],
                "description": [],
                "price": 1000.0
            }
        }));

        let product = project(&doc);

        assert_eq!(product.title, "");
        assert_eq!(product.description, None);
        assert_eq!(product.price_formatted, "R$ 1.000,00");
    }

    #[test]
    fn detail_fields_carry_over_when_present() {
        let doc = document(serde_json::json!({
            "id": "doc-3",
            "uid": "caneca",
            "type": "product",
            "data": {
                "title": [{ "type": "heading1", "text": "Caneca", "spans": [] }],
                "description": [
                    { "type": "paragraph", "text": "Caneca de porcelana,", "spans": [] },
                    { "type": "paragraph", "text": "300ml.", "spans": [] }
                ],
                "price": 35.0,
                "image": { "url": "https://images.example.com/caneca.png" }
            }
        }));

        let product = project(&doc);

        assert_eq!(
            product.description.as_deref(),
            Some("Caneca de porcelana, 300ml.")
        );
        assert_eq!(
            product.image_url.as_deref(),
            Some("https://images.example.com/caneca.png")
        );
    }

    #[test]
    fn projection_is_referentially_transparent() {
        let doc = document(serde_json::json!({
            "id": "doc-4",
            "uid": "bone",
            "type": "product",
            "data": {
                "title": [{ "type": "heading1", "text": "Boné", "spans": [] }],
                "price": 29.9
            }
        }));

        assert_eq!(project(&doc), project(&doc));
    }

    #[test]
    fn missing_price_field_formats_as_zero() {
        let doc = document(serde_json::json!({
            "id": "doc-5",
            "uid": "sem-preco",
            "type": "product",
            "data": {
                "title": [{ "type": "heading1", "text": "Sem preço", "spans": [] }]
            }
        }));

        let product = project(&doc);

        assert!((product.price - 0.0).abs() < f64::EPSILON);
        assert_eq!(product.price_formatted, "R$ 0,00");
    }
}

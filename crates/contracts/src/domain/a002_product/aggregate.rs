use serde::{Deserialize, Serialize};

// ============================================================================
// Product draft
// ============================================================================

/// Карточка товара в обмене с удалённым API. Категория хранится трояко:
/// корневая (`category_id`), полный путь подкатегорий (`sub_category_path`)
/// и legacy-поле `sub_category_id` с самой глубокой выбранной подкатегорией.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductDraft {
    #[serde(rename = "productId", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(rename = "productName")]
    pub product_name: String,

    #[serde(default)]
    pub sku: String,

    #[serde(default)]
    pub price: f64,

    /// Идентификатор категории верхнего уровня, "" если не выбрана
    #[serde(rename = "categoryId", default)]
    pub category_id: String,

    /// Путь подкатегорий сверху вниз, без корневой
    #[serde(rename = "subCategoryPath", default)]
    pub sub_category_path: Vec<String>,

    /// Legacy: дублирует последний элемент `sub_category_path`, "" если пусто
    #[serde(rename = "subCategoryId", default)]
    pub sub_category_id: String,
}

/// Конверт ответа `GET /api/products/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductResponse {
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default)]
    pub data: Option<ProductDraft>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_product_draft_camel_case_wire_names() {
        let draft = ProductDraft {
            id: Some(7),
            product_name: "Кроссовки".to_string(),
            sku: "SKU-7".to_string(),
            price: 4990.0,
            category_id: "2".to_string(),
            sub_category_path: vec!["21".to_string(), "213".to_string()],
            sub_category_id: "213".to_string(),
        };
        let raw = serde_json::to_value(&draft).unwrap();
        assert_eq!(raw["productId"], 7);
        assert_eq!(raw["productName"], "Кроссовки");
        assert_eq!(raw["categoryId"], "2");
        assert_eq!(raw["subCategoryPath"], json!(["21", "213"]));
        assert_eq!(raw["subCategoryId"], "213");
    }

    #[test]
    fn test_product_draft_missing_optional_fields() {
        let raw = json!({ "productName": "Шкаф" });
        let parsed: ProductDraft = serde_json::from_value(raw).unwrap();
        assert_eq!(parsed.id, None);
        assert_eq!(parsed.product_name, "Шкаф");
        assert_eq!(parsed.price, 0.0);
        assert!(parsed.category_id.is_empty());
        assert!(parsed.sub_category_path.is_empty());
        assert!(parsed.sub_category_id.is_empty());
    }
}

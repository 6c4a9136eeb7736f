use serde::{Deserialize, Serialize};

// ============================================================================
// Wire tree
// ============================================================================

/// Узел дерева категорий в том виде, в котором его отдаёт удалённый API.
/// `parentId == 0` означает корневую категорию.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryNode {
    #[serde(rename = "categoryId")]
    pub category_id: i64,

    #[serde(rename = "categoryName")]
    pub category_name: String,

    #[serde(rename = "parentId", default)]
    pub parent_id: i64,

    // Поле может отсутствовать целиком - старые версии API его не отдают
    #[serde(default)]
    pub children: Vec<CategoryNode>,
}

impl CategoryNode {
    pub fn new(category_id: i64, category_name: &str, parent_id: i64) -> Self {
        Self {
            category_id,
            category_name: category_name.to_string(),
            parent_id,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<CategoryNode>) -> Self {
        self.children = children;
        self
    }
}

// ============================================================================
// Response envelope
// ============================================================================

/// Конверт ответа `GET /api/categories/tree`.
///
/// Поле `data` исторически имеет две формы: `{ "result": [...] }` либо
/// сразу массив узлов. Обе формы поддерживаются через untagged enum,
/// всё остальное попадает в `Other` и трактуется вызывающей стороной
/// как неожиданная форма ответа.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryTreeResponse {
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default)]
    pub data: Option<CategoryTreeData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryTreeData {
    // Порядок вариантов важен: сначала пробуем `data.result`, потом массив
    Wrapped { result: Vec<CategoryNode> },
    Plain(Vec<CategoryNode>),
    Other(serde_json::Value),
}

// ============================================================================
// Mutations
// ============================================================================

/// Создание или изменение категории. `id == None` означает создание,
/// `parent_id == 0` - корневую категорию.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryUpsertRequest {
    #[serde(rename = "categoryId", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(rename = "categoryName")]
    pub name: String,

    #[serde(rename = "parentId", default)]
    pub parent_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tree_response_wrapped_result() {
        let raw = json!({
            "success": true,
            "data": { "result": [
                { "categoryId": 1, "categoryName": "Электроника", "parentId": 0 }
            ]}
        });
        let parsed: CategoryTreeResponse = serde_json::from_value(raw).unwrap();
        assert!(parsed.success);
        match parsed.data {
            Some(CategoryTreeData::Wrapped { result }) => {
                assert_eq!(result.len(), 1);
                assert_eq!(result[0].category_id, 1);
                assert_eq!(result[0].category_name, "Электроника");
                assert!(result[0].children.is_empty());
            }
            other => panic!("unexpected data variant: {:?}", other),
        }
    }

    #[test]
    fn test_tree_response_plain_array() {
        let raw = json!({
            "success": true,
            "data": [
                { "categoryId": 2, "categoryName": "Одежда", "parentId": 0,
                  "children": [
                      { "categoryId": 3, "categoryName": "Обувь", "parentId": 2 }
                  ]}
            ]
        });
        let parsed: CategoryTreeResponse = serde_json::from_value(raw).unwrap();
        match parsed.data {
            Some(CategoryTreeData::Plain(nodes)) => {
                assert_eq!(nodes.len(), 1);
                assert_eq!(nodes[0].children.len(), 1);
                assert_eq!(nodes[0].children[0].parent_id, 2);
            }
            other => panic!("unexpected data variant: {:?}", other),
        }
    }

    #[test]
    fn test_tree_response_unexpected_shape_falls_through() {
        let raw = json!({ "success": true, "data": { "total": 10 } });
        let parsed: CategoryTreeResponse = serde_json::from_value(raw).unwrap();
        assert!(matches!(parsed.data, Some(CategoryTreeData::Other(_))));
    }

    #[test]
    fn test_tree_response_message_and_absent_data() {
        let raw = json!({ "success": false, "message": "Нет доступа" });
        let parsed: CategoryTreeResponse = serde_json::from_value(raw).unwrap();
        assert!(!parsed.success);
        assert_eq!(parsed.message.as_deref(), Some("Нет доступа"));
        assert!(parsed.data.is_none());
    }

    #[test]
    fn test_upsert_request_skips_absent_id() {
        let req = CategoryUpsertRequest {
            id: None,
            name: "Новая".to_string(),
            parent_id: 0,
        };
        let raw = serde_json::to_value(&req).unwrap();
        assert!(raw.get("categoryId").is_none());
        assert_eq!(raw["parentId"], 0);
    }
}

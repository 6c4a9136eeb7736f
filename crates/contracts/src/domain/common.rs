use serde::{Deserialize, Serialize};

/// Общий ответ удалённого API на мутации (создание, изменение, удаление).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiAck {
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ack_message_is_optional() {
        let ok: ApiAck = serde_json::from_value(json!({ "success": true })).unwrap();
        assert!(ok.success);
        assert_eq!(ok.message, None);

        let failed: ApiAck =
            serde_json::from_value(json!({ "success": false, "message": "Занято" })).unwrap();
        assert_eq!(failed.message.as_deref(), Some("Занято"));
    }
}

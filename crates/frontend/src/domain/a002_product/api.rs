//! Обращения к удалённому API товаров через локальный шлюз.

use contracts::domain::a002_product::{ProductDraft, ProductResponse};
use contracts::domain::common::ApiAck;
use gloo_net::http::Request;

use crate::shared::api_utils::api_url;
use crate::system::auth::storage::get_access_token;

/// Загружает карточку товара по идентификатору.
pub async fn fetch_product(id: i64) -> Result<ProductDraft, String> {
    let token = match get_access_token() {
        Some(t) => t,
        None => return Err("Нет токена авторизации, войдите заново".to_string()),
    };

    let response = Request::get(&api_url(&format!("/api/products/{}", id)))
        .header("Authorization", &format!("Bearer {}", token))
        .send()
        .await
        .map_err(|e| format!("Ошибка сети: {}", e))?;

    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }

    let envelope = response
        .json::<ProductResponse>()
        .await
        .map_err(|e| format!("Ошибка парсинга: {}", e))?;
    envelope_to_draft(envelope)
}

/// Интерпретация конверта карточки, отделена от сетевой части.
pub fn envelope_to_draft(envelope: ProductResponse) -> Result<ProductDraft, String> {
    if !envelope.success {
        return Err(envelope
            .message
            .unwrap_or_else(|| "Сервер вернул ошибку без описания".to_string()));
    }
    envelope
        .data
        .ok_or_else(|| "Неожиданный формат ответа сервера".to_string())
}

/// Сохраняет карточку товара.
pub async fn save_product(draft: &ProductDraft) -> Result<(), String> {
    let token = match get_access_token() {
        Some(t) => t,
        None => return Err("Нет токена авторизации, войдите заново".to_string()),
    };

    let response = Request::post(&api_url("/api/products"))
        .header("Authorization", &format!("Bearer {}", token))
        .json(draft)
        .map_err(|e| format!("Ошибка сериализации: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Ошибка сети: {}", e))?;

    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }

    let ack = response
        .json::<ApiAck>()
        .await
        .map_err(|e| format!("Ошибка парсинга: {}", e))?;
    if ack.success {
        Ok(())
    } else {
        Err(ack
            .message
            .unwrap_or_else(|| "Сервер вернул ошибку без описания".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_product_envelope_requires_data_on_success() {
        let missing: ProductResponse = serde_json::from_value(json!({ "success": true })).unwrap();
        assert_eq!(
            envelope_to_draft(missing).unwrap_err(),
            "Неожиданный формат ответа сервера"
        );

        let ok: ProductResponse = serde_json::from_value(json!({
            "success": true,
            "data": { "productName": "Стол", "categoryId": "4" }
        }))
        .unwrap();
        let draft = envelope_to_draft(ok).unwrap();
        assert_eq!(draft.product_name, "Стол");
        assert_eq!(draft.category_id, "4");
    }

    #[test]
    fn test_product_envelope_failure_message() {
        let failed: ProductResponse =
            serde_json::from_value(json!({ "success": false, "message": "Товар удалён" })).unwrap();
        assert_eq!(envelope_to_draft(failed).unwrap_err(), "Товар удалён");
    }
}

//! Обращения к удалённому API категорий через локальный шлюз.

use contracts::domain::a001_category::{
    CategoryNode, CategoryTreeData, CategoryTreeResponse, CategoryUpsertRequest,
};
use contracts::domain::common::ApiAck;
use gloo_net::http::Request;

use crate::shared::api_utils::api_url;
use crate::system::auth::storage::get_access_token;

/// Загружает дерево категорий. Без токена авторизации запрос не уходит.
pub async fn fetch_category_tree() -> Result<Vec<CategoryNode>, String> {
    let token = match get_access_token() {
        Some(t) => t,
        None => return Err("Нет токена авторизации, войдите заново".to_string()),
    };

    let response = Request::get(&api_url("/api/categories/tree"))
        .header("Authorization", &format!("Bearer {}", token))
        .send()
        .await
        .map_err(|e| format!("Ошибка сети: {}", e))?;

    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }

    let envelope = response
        .json::<CategoryTreeResponse>()
        .await
        .map_err(|e| format!("Ошибка парсинга: {}", e))?;

    envelope_to_nodes(envelope)
}

/// Интерпретация конверта, отделена от сетевой части.
///
/// `success: true` с пустым списком не ошибка, у магазина просто нет
/// категорий. Ошибкой считается `success: false` и любая форма `data`,
/// кроме массива узлов или объекта с полем `result`.
pub fn envelope_to_nodes(envelope: CategoryTreeResponse) -> Result<Vec<CategoryNode>, String> {
    if !envelope.success {
        return Err(envelope
            .message
            .unwrap_or_else(|| "Сервер вернул ошибку без описания".to_string()));
    }
    match envelope.data {
        Some(CategoryTreeData::Wrapped { result }) => Ok(result),
        Some(CategoryTreeData::Plain(nodes)) => Ok(nodes),
        Some(CategoryTreeData::Other(_)) | None => {
            Err("Неожиданный формат ответа сервера".to_string())
        }
    }
}

/// Создаёт или изменяет категорию.
pub async fn save_category(request: &CategoryUpsertRequest) -> Result<(), String> {
    let token = match get_access_token() {
        Some(t) => t,
        None => return Err("Нет токена авторизации, войдите заново".to_string()),
    };

    let response = Request::post(&api_url("/api/categories"))
        .header("Authorization", &format!("Bearer {}", token))
        .json(request)
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
    ack_to_result(ack)
}

/// Удаляет категорию по идентификатору.
pub async fn delete_category(id: &str) -> Result<(), String> {
    let token = match get_access_token() {
        Some(t) => t,
        None => return Err("Нет токена авторизации, войдите заново".to_string()),
    };

    let response = Request::delete(&api_url(&format!("/api/categories/{}", id)))
        .header("Authorization", &format!("Bearer {}", token))
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
    ack_to_result(ack)
}

fn ack_to_result(ack: ApiAck) -> Result<(), String> {
    if ack.success {
        Ok(())
    } else {
        Err(ack
            .message
            .unwrap_or_else(|| "Сервер вернул ошибку без описания".to_string()))
    }
}

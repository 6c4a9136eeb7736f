//! Построение адресов API.
//!
//! Все запросы идут через локальный шлюз на порту 3000, хост берётся
//! из адресной строки браузера.

/// Базовый адрес шлюза, например "http://localhost:3000".
/// Пустая строка, если window недоступен (не браузерное окружение).
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:3000", protocol, hostname)
}

/// Полный адрес запроса по пути вида "/api/categories/tree".
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

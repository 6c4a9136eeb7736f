use crate::domain::a001_category::api::{delete_category, fetch_category_tree};
use crate::domain::a001_category::cascade::{flatten_tree, FlatCategory};
use crate::domain::a001_category::ui::details::CategoryDetails;
use crate::shared::components::ui::Input;
use crate::shared::icons::icon;
use leptos::prelude::*;

/// Страница "Категории": дерево с отступами по уровням, поиск по имени,
/// создание, редактирование и удаление.
#[component]
#[allow(non_snake_case)]
pub fn CategoryList() -> impl IntoView {
    let (items, set_items) = signal::<Vec<FlatCategory>>(Vec::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (loading, set_loading) = signal(false);
    let (filter_input, set_filter_input) = signal(String::new());
    let (filter_text, set_filter_text) = signal(String::new());
    let (show_details, set_show_details) = signal(false);
    let (editing_id, set_editing_id) = signal::<Option<String>>(None);
    let debounce_generation = StoredValue::new(0u32);

    let fetch = move || {
        set_loading.set(true);
        wasm_bindgen_futures::spawn_local(async move {
            match fetch_category_tree().await {
                Ok(nodes) => {
                    set_items.set(flatten_tree(&nodes));
                    set_error.set(None);
                }
                Err(e) => {
                    set_items.set(Vec::new());
                    set_error.set(Some(e));
                }
            }
            set_loading.set(false);
        });
    };

    // Поиск применяется через 300 мс после последнего ввода,
    // минимум 3 символа (пустая строка сбрасывает фильтр)
    let handle_filter_input = move |val: String| {
        set_filter_input.set(val.clone());
        let generation = debounce_generation.get_value() + 1;
        debounce_generation.set_value(generation);
        wasm_bindgen_futures::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(300).await;
            // За время паузы страница могла быть размонтирована
            if let Some(text) =
                debounced_filter(debounce_generation.try_get_value(), generation, &val)
            {
                set_filter_text.set(text);
            }
        });
    };

    let handle_delete = move |id: String, name: String| {
        let confirmed = match web_sys::window() {
            Some(win) => win
                .confirm_with_message(&format!("Удалить категорию \"{}\"?", name))
                .unwrap_or(false),
            None => false,
        };
        if !confirmed {
            return;
        }
        wasm_bindgen_futures::spawn_local(async move {
            match delete_category(&id).await {
                Ok(()) => fetch(),
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    let filtered = move || {
        let filter = filter_text.get().to_lowercase();
        let all = items.get();
        if filter.len() < 3 {
            return all;
        }
        all.into_iter()
            .filter(|c| c.name.to_lowercase().contains(&filter))
            .collect()
    };

    fetch();

    view! {
        <div class="page">
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">{"Категории"}</h1>
                </div>
                <div class="header__actions">
                    <button
                        class="button button--primary"
                        on:click=move |_| {
                            set_editing_id.set(None);
                            set_show_details.set(true);
                        }
                    >
                        {icon("plus")}
                        {"Новая категория"}
                    </button>
                    <button class="button button--secondary" on:click=move |_| fetch()>
                        {icon("refresh")}
                        {"Обновить"}
                    </button>
                </div>
            </div>

            {move || error.get().map(|e| view! {
                <div class="warning-box">
                    <span class="warning-box__icon">"⚠"</span>
                    <span class="warning-box__text">{e}</span>
                </div>
            })}

            <Input
                value=Signal::derive(move || filter_input.get())
                on_input=Callback::new(handle_filter_input)
                placeholder="Поиск (мин. 3 символа)..."
            />

            <Show when=move || show_details.get()>
                {move || {
                    let id = editing_id.get();
                    view! {
                        <CategoryDetails
                            id=id
                            on_saved=Callback::new(move |_| {
                                set_show_details.set(false);
                                fetch();
                            })
                            on_cancel=Callback::new(move |_| set_show_details.set(false))
                        />
                    }
                }}
            </Show>

            <div class="table">
                <table class="table__data table--striped">
                    <thead class="table__head">
                        <tr>
                            <th class="table__header-cell">{"Наименование"}</th>
                            <th class="table__header-cell">{"Код"}</th>
                            <th class="table__header-cell">{"Подкатегории"}</th>
                            <th class="table__header-cell"></th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || filtered().into_iter().map(|row| {
                            let id = row.id.clone();
                            let id_for_edit = id.clone();
                            let id_for_delete = id.clone();
                            let name_for_delete = row.name.clone();
                            // Отступ показывает уровень вложенности
                            let indent = format!("padding-left: {}px", 8 + row.level * 24);
                            view! {
                                <tr
                                    class="table__row"
                                    on:click=move |_| {
                                        set_editing_id.set(Some(id_for_edit.clone()));
                                        set_show_details.set(true);
                                    }
                                >
                                    <td class="table__cell" style=indent>{row.name.clone()}</td>
                                    <td class="table__cell">{id.clone()}</td>
                                    <td class="table__cell">
                                        {if row.has_children { "есть" } else { "нет" }}
                                    </td>
                                    <td class="table__cell">
                                        <button
                                            class="button button--secondary"
                                            on:click=move |ev| {
                                                ev.stop_propagation();
                                                handle_delete(id_for_delete.clone(), name_for_delete.clone());
                                            }
                                        >
                                            {icon("delete")}
                                        </button>
                                    </td>
                                </tr>
                            }
                        }).collect_view()}
                    </tbody>
                </table>
            </div>

            <Show when=move || loading.get()>
                <div class="page__loading">{"Загрузка..."}</div>
            </Show>
        </div>
    }
}

// Фильтр после задержки. Счётчик None (страница размонтирована) или
// не совпавший номер означают, что применять результат нельзя.
fn debounced_filter(current: Option<u32>, scheduled: u32, raw: &str) -> Option<String> {
    if current != Some(scheduled) {
        return None;
    }
    let trimmed = raw.trim();
    if trimmed.len() >= 3 || trimmed.is_empty() {
        Some(trimmed.to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debounced_filter_applies_latest_input() {
        assert_eq!(
            debounced_filter(Some(2), 2, "  Диван  "),
            Some("Диван".to_string())
        );
    }

    #[test]
    fn test_debounced_filter_skips_stale_timer() {
        // Пока таймер ждал, пользователь ввёл ещё символ
        assert_eq!(debounced_filter(Some(3), 2, "див"), None);
    }

    #[test]
    fn test_debounced_filter_short_input_keeps_filter() {
        // Порог считается в байтах, как в остальной фильтрации
        assert_eq!(debounced_filter(Some(1), 1, "д"), None);
        assert_eq!(debounced_filter(Some(1), 1, "ab"), None);
    }

    #[test]
    fn test_debounced_filter_empty_input_resets() {
        assert_eq!(debounced_filter(Some(1), 1, "   "), Some(String::new()));
    }

    #[test]
    fn test_debounced_filter_after_page_unmount() {
        // Уход со страницы до срабатывания таймера: владелец удалён
        // вместе со счётчиком, поздний результат молча отбрасывается
        let owner = Owner::new();
        let counter = owner.with(|| StoredValue::new(1u32));
        drop(owner);
        assert_eq!(counter.try_get_value(), None);
        assert_eq!(debounced_filter(counter.try_get_value(), 1, "Диван"), None);
    }
}

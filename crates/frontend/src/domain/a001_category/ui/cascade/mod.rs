//! Цепочка выпадающих списков по уровням категорий.

use crate::domain::a001_category::api::fetch_category_tree;
use crate::domain::a001_category::cascade::{
    apply_selection, build_levels, flatten_tree, FlatCategory, SelectionPath, SelectionUpdate,
};
use crate::shared::components::ui::Select;
use leptos::prelude::*;

/// Виджет каскадного выбора категории.
///
/// Дерево загружается один раз при монтировании. Путь выбора живёт у
/// родителя: каждый выбор уходит наверх через `on_change`, сам виджет
/// путь не хранит и ничего не запоминает между рендерами.
#[component]
pub fn CategoryCascade(
    #[prop(into)] path: Signal<SelectionPath>,
    #[prop(into)] on_change: Callback<SelectionUpdate>,
    #[prop(optional)] disabled: bool,
) -> impl IntoView {
    let (flat, set_flat) = signal::<Vec<FlatCategory>>(Vec::new());
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal::<Option<String>>(None);

    wasm_bindgen_futures::spawn_local(async move {
        let started = js_sys::Date::now();
        match fetch_category_tree().await {
            Ok(nodes) => {
                let flat_list = flatten_tree(&nodes);
                log::info!(
                    "Дерево категорий: {} узлов за {:.0} мс",
                    flat_list.len(),
                    js_sys::Date::now() - started
                );
                set_flat.set(flat_list);
                set_error.set(None);
            }
            Err(e) => {
                log::error!("Категории не загрузились: {}", e);
                set_flat.set(Vec::new());
                set_error.set(Some(e));
            }
        }
        set_loading.set(false);
    });

    view! {
        <div class="category-cascade">
            {move || error.get().map(|e| view! {
                <div class="category-cascade__error">{e}</div>
            })}

            <Show when=move || loading.get()>
                <div class="category-cascade__loading">{"Загрузка категорий..."}</div>
            </Show>

            {move || {
                let is_loading = loading.get();
                build_levels(&path.get(), &flat.get())
                    .into_iter()
                    .map(|lvl| {
                        let level_index = lvl.level;
                        let no_options = lvl.options.is_empty();
                        let selected = lvl.selected_id.clone();
                        let options: Vec<(String, String)> = lvl
                            .options
                            .iter()
                            .map(|o| (o.id.clone(), o.name.clone()))
                            .collect();
                        let label = if level_index == 0 {
                            "Категория".to_string()
                        } else {
                            format!("Подкатегория {}", level_index)
                        };
                        view! {
                            <Select
                                label=label
                                value=Signal::derive(move || selected.clone())
                                options=Signal::derive(move || options.clone())
                                placeholder="(не выбрано)"
                                disabled=disabled || is_loading || no_options
                                on_change=Callback::new(move |value: String| {
                                    on_change.run(apply_selection(&path.get(), level_index, &value));
                                })
                            />
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}

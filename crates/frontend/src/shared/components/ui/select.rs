use leptos::prelude::*;

/// Выпадающий список с подписью. Пары (значение, подпись) приходят
/// готовыми; `placeholder` добавляет первым пункт с пустым значением,
/// через него выбор снимается.
#[component]
pub fn Select(
    #[prop(optional, into)] label: MaybeProp<String>,
    #[prop(into)] value: Signal<String>,
    #[prop(optional)] on_change: Option<Callback<String>>,
    #[prop(into)] options: Signal<Vec<(String, String)>>,
    #[prop(optional, into)] placeholder: MaybeProp<String>,
    #[prop(optional)] disabled: bool,
    #[prop(optional, into)] id: MaybeProp<String>,
) -> impl IntoView {
    let select_id = move || id.get().unwrap_or_default();

    let rows = move || {
        let mut rows: Vec<(String, String)> = Vec::new();
        if let Some(text) = placeholder.get() {
            rows.push((String::new(), text));
        }
        rows.extend(options.get());
        rows
    };

    view! {
        <div class="field">
            {move || label.get().map(|l| view! {
                <label class="field__label" for=select_id>
                    {l}
                </label>
            })}
            <select
                id=select_id
                class="field__select"
                disabled=disabled
                on:change=move |ev| {
                    if let Some(handler) = on_change {
                        handler.run(event_target_value(&ev));
                    }
                }
            >
                <For
                    each=rows
                    key=|(val, _)| val.clone()
                    children=move |(val, title)| {
                        let val_clone = val.clone();
                        let is_selected = move || value.get() == val_clone;
                        view! {
                            <option value=val selected=is_selected>
                                {title}
                            </option>
                        }
                    }
                />
            </select>
        </div>
    }
}

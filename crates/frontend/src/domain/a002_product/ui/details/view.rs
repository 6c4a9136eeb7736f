use crate::domain::a001_category::cascade::{SelectionPath, SelectionUpdate};
use crate::domain::a001_category::ui::cascade::CategoryCascade;
use crate::domain::a002_product::api;
use crate::shared::icons::icon;
use contracts::domain::a002_product::ProductDraft;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Карточка товара. Без `id` открывается в режиме создания.
#[component]
pub fn ProductDetails(#[prop(optional)] id: Option<i64>) -> impl IntoView {
    let id_state = RwSignal::new(id);
    let product_name = RwSignal::new(String::new());
    let sku = RwSignal::new(String::new());
    let price_input = RwSignal::new(String::new());
    let category_path = RwSignal::new(SelectionPath::empty());
    let sub_category_id = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let notice = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);

    Effect::new(move |_| {
        let Some(product_id) = id_state.get() else {
            return;
        };
        spawn_local(async move {
            error.set(None);
            match api::fetch_product(product_id).await {
                Ok(draft) => {
                    product_name.set(draft.product_name);
                    sku.set(draft.sku);
                    price_input.set(format!("{}", draft.price));
                    category_path.set(SelectionPath::from_legacy(
                        &draft.category_id,
                        &draft.sub_category_path,
                    ));
                    sub_category_id.set(draft.sub_category_id);
                }
                Err(e) => error.set(Some(e)),
            }
        });
    });

    let is_form_valid = Signal::derive(move || !product_name.get().trim().is_empty());

    let handle_save = move |_| {
        if !is_form_valid.get() {
            error.set(Some("Наименование обязательно для заполнения".to_string()));
            return;
        }
        let price_raw = price_input.get().trim().replace(',', ".");
        let price = if price_raw.is_empty() {
            0.0
        } else {
            match price_raw.parse::<f64>() {
                Ok(v) => v,
                Err(_) => {
                    error.set(Some("Цена должна быть числом".to_string()));
                    return;
                }
            }
        };

        saving.set(true);
        error.set(None);
        notice.set(None);

        let (category_id, sub_category_path) = category_path.get().to_legacy();
        let draft = ProductDraft {
            id: id_state.get(),
            product_name: product_name.get().trim().to_string(),
            sku: sku.get().trim().to_string(),
            price,
            category_id,
            sub_category_path,
            sub_category_id: sub_category_id.get(),
        };

        spawn_local(async move {
            match api::save_product(&draft).await {
                Ok(()) => {
                    saving.set(false);
                    notice.set(Some("Товар сохранён".to_string()));
                }
                Err(e) => {
                    saving.set(false);
                    error.set(Some(e));
                }
            }
        });
    };

    view! {
        <div class="page">
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">
                        {move || if id_state.get().is_some() { "Карточка товара" } else { "Новый товар" }}
                    </h1>
                </div>
                <div class="header__actions">
                    <Show when=move || saving.get()>
                        <Space gap=SpaceGap::Small>
                            <Spinner />
                            <span>"Сохранение..."</span>
                        </Space>
                    </Show>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=handle_save
                        disabled=Signal::derive(move || saving.get() || !is_form_valid.get())
                    >
                        {icon("save")}
                        " Сохранить"
                    </Button>
                </div>
            </div>

            {move || error.get().map(|e| view! {
                <div class="warning-box">
                    <span class="warning-box__icon">"⚠"</span>
                    <span class="warning-box__text">{e}</span>
                </div>
            })}
            {move || notice.get().map(|n| view! {
                <div class="success-note">{n}</div>
            })}

            <div class="details-section">
                <h4 class="details-section__title">"Основные поля"</h4>

                <div class="form__group">
                    <label class="form__label">"Наименование"</label>
                    <Input value=product_name placeholder="Введите наименование" />
                </div>

                <div class="form__group">
                    <label class="form__label">"Артикул"</label>
                    <Input value=sku placeholder="Опционально" />
                </div>

                <div class="form__group">
                    <label class="form__label">"Цена"</label>
                    <Input value=price_input placeholder="0.00" />
                </div>
            </div>

            <div class="details-section">
                <h4 class="details-section__title">"Категория"</h4>
                // Выбор уходит в legacy-поля карточки: корень, путь
                // подкатегорий и самая глубокая подкатегория отдельно
                <CategoryCascade
                    path=Signal::derive(move || category_path.get())
                    on_change=Callback::new(move |update: SelectionUpdate| {
                        sub_category_id.set(update.legacy_sub_category_id.clone());
                        category_path.set(update.path);
                    })
                />
            </div>
        </div>
    }
}

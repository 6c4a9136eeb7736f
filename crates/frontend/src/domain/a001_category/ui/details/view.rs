use crate::domain::a001_category::api;
use crate::domain::a001_category::cascade::{
    flatten_tree, path_to, SelectionPath, SelectionUpdate,
};
use crate::domain::a001_category::ui::cascade::CategoryCascade;
use crate::shared::icons::icon;
use contracts::domain::a001_category::CategoryUpsertRequest;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

#[component]
pub fn CategoryDetails(
    id: Option<String>,
    #[prop(into)] on_saved: Callback<()>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    let id_state = RwSignal::new(id);
    let name = RwSignal::new(String::new());
    let parent_path = RwSignal::new(SelectionPath::empty());
    let error = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);

    // Имя и путь родителя берутся из общего дерева, отдельного запроса
    // по id у удалённого API нет
    Effect::new(move |_| {
        let Some(category_id) = id_state.get() else {
            return;
        };
        spawn_local(async move {
            error.set(None);
            match api::fetch_category_tree().await {
                Ok(nodes) => {
                    let flat = flatten_tree(&nodes);
                    match flat.iter().find(|c| c.id == category_id) {
                        Some(cat) => {
                            name.set(cat.name.clone());
                            match &cat.parent_id {
                                Some(pid) => parent_path.set(path_to(&flat, pid)),
                                None => parent_path.set(SelectionPath::empty()),
                            }
                        }
                        None => error.set(Some("Категория не найдена в дереве".to_string())),
                    }
                }
                Err(e) => error.set(Some(e)),
            }
        });
    });

    let is_edit_mode = Signal::derive(move || id_state.get().is_some());
    let is_form_valid = Signal::derive(move || !name.get().trim().is_empty());

    let handle_save = move |_| {
        if !is_form_valid.get() {
            error.set(Some("Наименование обязательно для заполнения".to_string()));
            return;
        }
        let own_id = id_state.get();
        let path = parent_path.get();
        if let Some(ref own) = own_id {
            if path.ids().iter().any(|p| p == own) {
                error.set(Some("Категория не может быть родителем самой себя".to_string()));
                return;
            }
        }

        saving.set(true);
        error.set(None);

        let request = CategoryUpsertRequest {
            id: own_id.and_then(|s| s.parse::<i64>().ok()),
            name: name.get().trim().to_string(),
            // Родитель это последний выбранный уровень каскада, 0 = корень
            parent_id: path
                .ids()
                .last()
                .and_then(|s| s.parse::<i64>().ok())
                .unwrap_or(0),
        };

        spawn_local(async move {
            match api::save_category(&request).await {
                Ok(()) => {
                    saving.set(false);
                    on_saved.run(());
                }
                Err(e) => {
                    saving.set(false);
                    error.set(Some(e));
                }
            }
        });
    };

    view! {
        <div class="details-container category-details">
            <div class="modal-header">
                <h3 class="modal-title">
                    {move || if is_edit_mode.get() { "Редактирование категории" } else { "Новая категория" }}
                </h3>
                <div class="modal-header-actions">
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
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_cancel.run(())>
                        {icon("x")}
                        " Закрыть"
                    </Button>
                </div>
            </div>

            <div class="modal-body">
                {move || error.get().map(|e| view! {
                    <div class="warning-box">
                        <span class="warning-box__icon">"⚠"</span>
                        <span class="warning-box__text">{e}</span>
                    </div>
                })}

                <div class="form__group">
                    <label class="form__label">"Наименование"</label>
                    <Input value=name placeholder="Введите наименование" />
                </div>

                <div class="form__group">
                    <label class="form__label">"Родительская категория"</label>
                    <CategoryCascade
                        path=Signal::derive(move || parent_path.get())
                        on_change=Callback::new(move |update: SelectionUpdate| {
                            parent_path.set(update.path);
                        })
                    />
                </div>
            </div>
        </div>
    }
}

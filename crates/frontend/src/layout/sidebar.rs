use super::global_context::{ActivePage, AppGlobalContext};
use leptos::prelude::*;

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");

    let nav_item = move |page: ActivePage, title: &'static str| {
        view! {
            <button
                class="sidebar__item"
                class:sidebar__item--active=move || ctx.active_page.get() == page
                on:click=move |_| ctx.active_page.set(page)
            >
                {title}
            </button>
        }
    };

    view! {
        <nav class="sidebar">
            {nav_item(ActivePage::Products, "Товары")}
            {nav_item(ActivePage::Categories, "Категории")}
        </nav>
    }
}

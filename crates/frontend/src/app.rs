use crate::domain::a001_category::ui::list::CategoryList;
use crate::domain::a002_product::ui::details::ProductDetails;
use crate::layout::global_context::{ActivePage, AppGlobalContext};
use crate::layout::Shell;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Provide the AppGlobalContext store to the whole app via context.
    provide_context(AppGlobalContext::new());

    view! {
        <Shell center=|| view! { <ActiveScreen /> }.into_any() />
    }
}

/// Переключение рабочих экранов без роутера, по сигналу из контекста
#[component]
fn ActiveScreen() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");

    view! {
        <Show
            when=move || ctx.active_page.get() == ActivePage::Categories
            fallback=|| view! { <ProductDetails /> }
        >
            <CategoryList />
        </Show>
    }
}

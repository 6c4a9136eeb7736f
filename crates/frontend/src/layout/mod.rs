pub mod global_context;
pub mod sidebar;

use leptos::prelude::*;
use sidebar::Sidebar;

/// Каркас приложения.
///
/// ```text
/// +------------------------------------------+
/// |                TopBar                    |
/// +------------------------------------------+
/// |  Sidebar  |          Content             |
/// +------------------------------------------+
/// ```
#[component]
pub fn Shell<C>(center: C) -> impl IntoView
where
    C: Fn() -> AnyView + 'static + Send,
{
    view! {
        <div class="app-layout">
            <header class="top-header">
                <span class="top-header__title">{"Панель администратора"}</span>
            </header>

            <div class="app-body">
                <Sidebar />

                <div class="app-main">
                    {center()}
                </div>
            </div>
        </div>
    }
}

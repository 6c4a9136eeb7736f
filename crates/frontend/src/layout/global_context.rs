use leptos::prelude::*;

/// Рабочие экраны приложения
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ActivePage {
    Products,
    Categories,
}

#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub active_page: RwSignal<ActivePage>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            active_page: RwSignal::new(ActivePage::Products),
        }
    }
}

//! Built-in app registry and window-content dispatch.

use desktop_app_asmr::AsmrApp;
use desktop_app_contract::AppMountContext;
use desktop_app_music::MusicApp;
use desktop_app_notes::NotesApp;
use desktop_app_pomodoro::PomodoroApp;
use desktop_app_settings::SettingsApp;
use desktop_app_todo::TodoApp;
use leptos::*;

use crate::model::AppId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Static registration entry for one built-in app.
pub struct AppDescriptor {
    /// App identity.
    pub app_id: AppId,
    /// Label shown in the dock tooltip.
    pub dock_label: &'static str,
}

// Dock order, left to right.
const APP_REGISTRY: [AppDescriptor; 6] = [
    AppDescriptor {
        app_id: AppId::Pomodoro,
        dock_label: "Pomodoro",
    },
    AppDescriptor {
        app_id: AppId::Music,
        dock_label: "Music",
    },
    AppDescriptor {
        app_id: AppId::Asmr,
        dock_label: "ASMR",
    },
    AppDescriptor {
        app_id: AppId::Todo,
        dock_label: "To-Do",
    },
    AppDescriptor {
        app_id: AppId::Notes,
        dock_label: "Notes",
    },
    AppDescriptor {
        app_id: AppId::Settings,
        dock_label: "Settings",
    },
];

/// Returns every registered app in dock order.
pub fn app_registry() -> &'static [AppDescriptor] {
    &APP_REGISTRY
}

/// Mounts the app view for a window's content area.
pub fn render_app(app_id: AppId, ctx: AppMountContext) -> View {
    match app_id {
        AppId::Pomodoro => view! { <PomodoroApp ctx=ctx /> }.into_view(),
        AppId::Music => view! { <MusicApp ctx=ctx /> }.into_view(),
        AppId::Asmr => view! { <AsmrApp ctx=ctx /> }.into_view(),
        AppId::Todo => view! { <TodoApp ctx=ctx /> }.into_view(),
        AppId::Notes => view! { <NotesApp ctx=ctx /> }.into_view(),
        AppId::Settings => view! { <SettingsApp ctx=ctx /> }.into_view(),
    }
}

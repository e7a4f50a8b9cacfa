use super::*;
use crate::apps::{app_registry, AppDescriptor};
use crate::model::AppId;

fn dock_glyph(app_id: AppId) -> &'static str {
    match app_id {
        AppId::Pomodoro => "⏱",
        AppId::Music => "♪",
        AppId::Asmr => "〰",
        AppId::Todo => "☑",
        AppId::Notes => "✎",
        AppId::Settings => "⚙",
    }
}

#[component]
pub(super) fn Dock() -> impl IntoView {
    view! {
        <footer class="dock" role="toolbar" aria-label="Dock">
            {app_registry()
                .iter()
                .map(|descriptor| view! { <DockItem descriptor=*descriptor /> })
                .collect_view()}
        </footer>
    }
}

#[component]
fn DockItem(descriptor: AppDescriptor) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let app_id = descriptor.app_id;

    let window = Signal::derive(move || {
        runtime
            .state
            .get()
            .window_for_app(app_id)
            .cloned()
    });
    let running = move || window.get().is_some();
    let minimized = move || window.get().map(|w| w.minimized).unwrap_or(false);

    let on_click = move |_| {
        runtime.dispatch_action(DesktopAction::ToggleDockApp {
            app_id,
            viewport: runtime.host.get_value().desktop_viewport_rect(),
        });
    };

    view! {
        <button
            class="dock-item"
            class:running=running
            class:minimized=minimized
            title=descriptor.dock_label
            aria-label=descriptor.dock_label
            on:click=on_click
        >
            <span class="dock-glyph" aria-hidden="true">{dock_glyph(app_id)}</span>
            <span class="dock-indicator" aria-hidden="true"></span>
        </button>
    }
}

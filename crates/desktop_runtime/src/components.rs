//! Desktop shell UI composition and interaction surfaces.

mod dock;
mod menubar;
mod wallpaper;
mod window;

use leptos::*;

use self::{dock::Dock, menubar::MenuBar, wallpaper::WallpaperLayer, window::DesktopWindow};
use crate::{
    model::{PointerPosition, WindowId},
    reducer::DesktopAction,
};
use desktop_app_contract::settings::ThemeMode;

pub use crate::runtime_context::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext};

/// Menu bar height reserved at the top of the viewport.
pub const MENU_BAR_HEIGHT_PX: i32 = 32;
/// Dock height reserved at the bottom of the viewport.
pub const DOCK_HEIGHT_PX: i32 = 72;

/// DOM id apps render on their primary text input to receive focus on open.
pub fn window_primary_input_dom_id(window_id: WindowId) -> String {
    format!("window-input-{}", window_id.0)
}

fn pointer_from_pointer_event(ev: &web_sys::PointerEvent) -> PointerPosition {
    PointerPosition {
        x: ev.client_x(),
        y: ev.client_y(),
    }
}

fn stop_mouse_event(ev: &web_sys::MouseEvent) {
    ev.prevent_default();
    ev.stop_propagation();
}

fn end_active_pointer_interaction(runtime: DesktopRuntimeContext) {
    let interaction = runtime.interaction.get_untracked();
    if interaction.dragging.is_some() {
        runtime.dispatch_action(DesktopAction::EndMove);
    }
    if interaction.resizing.is_some() {
        runtime.dispatch_action(DesktopAction::EndResize);
    }
}

#[component]
/// Renders the full desktop shell: wallpaper, menu bar, window layer, and dock.
pub fn DesktopShell() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;

    let theme_attr = move || match state.get().settings.theme {
        ThemeMode::Dark => "dark",
        ThemeMode::Light => "light",
    };
    let accent_style = move || format!("--accent-color:{};", state.get().settings.accent_color);

    let on_pointer_move = move |ev: web_sys::PointerEvent| {
        let interaction = runtime.interaction.get_untracked();
        if interaction.dragging.is_none() && interaction.resizing.is_none() {
            return;
        }
        let pointer = pointer_from_pointer_event(&ev);
        let viewport = runtime.host.get_value().desktop_viewport_rect();
        if interaction.dragging.is_some() {
            runtime.dispatch_action(DesktopAction::UpdateMove { pointer, viewport });
        }
        if interaction.resizing.is_some() {
            runtime.dispatch_action(DesktopAction::UpdateResize { pointer, viewport });
        }
    };
    let on_pointer_end = move |_| end_active_pointer_interaction(runtime);

    let window_ids = move || {
        state
            .get()
            .windows
            .iter()
            .map(|w| w.id)
            .collect::<Vec<_>>()
    };

    view! {
        <div
            class="desktop-shell"
            data-theme=theme_attr
            style=accent_style
            on:pointermove=on_pointer_move
            on:pointerup=on_pointer_end
            on:pointercancel=on_pointer_end
        >
            <WallpaperLayer />
            <MenuBar />
            <main class="desktop-window-layer">
                <For each=window_ids key=|id| *id let:window_id>
                    <DesktopWindow window_id=window_id />
                </For>
            </main>
            <Dock />
        </div>
    }
}

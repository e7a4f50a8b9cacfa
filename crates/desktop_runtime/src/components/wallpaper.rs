use super::*;
use platform_host::{default_wallpaper, resolve_wallpaper, WallpaperEntry, WallpaperMediaKind};

#[component]
pub(super) fn WallpaperLayer() -> impl IntoView {
    let runtime = use_desktop_runtime();

    let entry = Signal::derive(move || {
        let selection = runtime.state.get().settings.wallpaper;
        *resolve_wallpaper(&selection.wallpaper_id).unwrap_or_else(default_wallpaper)
    });

    view! {
        <div class="wallpaper-layer" aria-hidden="true">
            {move || render_wallpaper(entry.get())}
        </div>
    }
}

fn render_wallpaper(entry: WallpaperEntry) -> View {
    match entry.kind {
        WallpaperMediaKind::Image => view! {
            <img class="wallpaper-media" src=entry.url alt="" />
        }
        .into_view(),
        WallpaperMediaKind::Video => view! {
            <video
                class="wallpaper-media"
                src=entry.url
                autoplay=true
                muted=true
                loop=true
                playsinline=true
            />
        }
        .into_view(),
    }
}

//! Built-in wallpaper catalog.
//!
//! Wallpapers are plain URLs rendered by platform media elements; the shell
//! only needs to know whether a source is a static image or a looping video.
//! The catalog is fixed — asset import/management is out of scope.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Media kind of a wallpaper source.
pub enum WallpaperMediaKind {
    /// Static image rendered by an `<img>`/background layer.
    Image,
    /// Muted looping video rendered by a `<video>` element.
    Video,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// One catalog wallpaper.
pub struct WallpaperEntry {
    /// Stable catalog identifier.
    pub id: &'static str,
    /// Source URL.
    pub url: &'static str,
    /// Display title.
    pub title: &'static str,
    /// Credited author.
    pub author: &'static str,
    /// Image or video.
    pub kind: WallpaperMediaKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Persisted wallpaper choice.
pub struct WallpaperSelection {
    /// Catalog id of the selected wallpaper.
    pub wallpaper_id: String,
}

impl Default for WallpaperSelection {
    fn default() -> Self {
        Self {
            wallpaper_id: DEFAULT_WALLPAPER_ID.to_string(),
        }
    }
}

const DEFAULT_WALLPAPER_ID: &str = "lofi-1";

const IMAGE_WALLPAPERS: [WallpaperEntry; 4] = [
    WallpaperEntry {
        id: "lofi-1",
        url: "/wallpapers/lofi-1.jpg",
        title: "Lo-fi Desk",
        author: "StudyDesk",
        kind: WallpaperMediaKind::Image,
    },
    WallpaperEntry {
        id: "lofi-2",
        url: "/wallpapers/lofi-2.jpg",
        title: "Evening Window",
        author: "StudyDesk",
        kind: WallpaperMediaKind::Image,
    },
    WallpaperEntry {
        id: "lofi-3",
        url: "/wallpapers/lofi-3.jpg",
        title: "City Dusk",
        author: "StudyDesk",
        kind: WallpaperMediaKind::Image,
    },
    WallpaperEntry {
        id: "lofi-4",
        url: "/wallpapers/lofi-4.jpg",
        title: "Quiet Shelf",
        author: "StudyDesk",
        kind: WallpaperMediaKind::Image,
    },
];

const VIDEO_WALLPAPERS: [WallpaperEntry; 8] = [
    WallpaperEntry {
        id: "video-rain",
        url: "/wallpapers/video/rain.mp4",
        title: "Rain",
        author: "StudyDesk",
        kind: WallpaperMediaKind::Video,
    },
    WallpaperEntry {
        id: "video-train",
        url: "/wallpapers/video/train.mp4",
        title: "Train",
        author: "StudyDesk",
        kind: WallpaperMediaKind::Video,
    },
    WallpaperEntry {
        id: "video-classroom",
        url: "/wallpapers/video/classroom.mp4",
        title: "Classroom",
        author: "StudyDesk",
        kind: WallpaperMediaKind::Video,
    },
    WallpaperEntry {
        id: "video-autumn",
        url: "/wallpapers/video/autumn.mp4",
        title: "Autumn",
        author: "StudyDesk",
        kind: WallpaperMediaKind::Video,
    },
    WallpaperEntry {
        id: "video-night",
        url: "/wallpapers/video/night.mp4",
        title: "Night",
        author: "StudyDesk",
        kind: WallpaperMediaKind::Video,
    },
    WallpaperEntry {
        id: "video-coffee",
        url: "/wallpapers/video/coffee.mp4",
        title: "Coffee",
        author: "StudyDesk",
        kind: WallpaperMediaKind::Video,
    },
    WallpaperEntry {
        id: "video-winter",
        url: "/wallpapers/video/winter.mp4",
        title: "Winter",
        author: "StudyDesk",
        kind: WallpaperMediaKind::Video,
    },
    WallpaperEntry {
        id: "video-garden",
        url: "/wallpapers/video/garden.mp4",
        title: "Garden",
        author: "StudyDesk",
        kind: WallpaperMediaKind::Video,
    },
];

const ONLINE_WALLPAPERS: [WallpaperEntry; 4] = [
    WallpaperEntry {
        id: "online-coding-night",
        url: "https://images.unsplash.com/photo-1542831371-29b0f74f9713?q=80&w=1920&auto=format&fit=crop",
        title: "Coding in the Night",
        author: "Florian Olivo",
        kind: WallpaperMediaKind::Image,
    },
    WallpaperEntry {
        id: "online-cozy-room",
        url: "https://images.unsplash.com/photo-1483000805330-4eaf0a0d82da?q=80&w=1920&auto=format&fit=crop",
        title: "Cozy Room",
        author: "Toa Heftiba",
        kind: WallpaperMediaKind::Image,
    },
    WallpaperEntry {
        id: "online-night-city",
        url: "https://images.unsplash.com/photo-1501139083538-0139583c060f?q=80&w=1920&auto=format&fit=crop",
        title: "Night City",
        author: "Orfeas Green",
        kind: WallpaperMediaKind::Image,
    },
    WallpaperEntry {
        id: "online-study-room",
        url: "https://images.unsplash.com/photo-1507090960745-b32f65d3113a?q=80&w=1920&auto=format&fit=crop",
        title: "Study Room",
        author: "Patrick Tomasso",
        kind: WallpaperMediaKind::Image,
    },
];

/// Returns the bundled static-image wallpapers.
pub fn image_wallpapers() -> &'static [WallpaperEntry] {
    &IMAGE_WALLPAPERS
}

/// Returns the bundled looping-video wallpapers.
pub fn video_wallpapers() -> &'static [WallpaperEntry] {
    &VIDEO_WALLPAPERS
}

/// Returns the curated remote-image wallpapers.
pub fn online_wallpapers() -> &'static [WallpaperEntry] {
    &ONLINE_WALLPAPERS
}

/// Looks up a catalog wallpaper by id.
pub fn resolve_wallpaper(wallpaper_id: &str) -> Option<&'static WallpaperEntry> {
    IMAGE_WALLPAPERS
        .iter()
        .chain(VIDEO_WALLPAPERS.iter())
        .chain(ONLINE_WALLPAPERS.iter())
        .find(|entry| entry.id == wallpaper_id)
}

/// Returns the default wallpaper entry.
pub fn default_wallpaper() -> &'static WallpaperEntry {
    resolve_wallpaper(DEFAULT_WALLPAPER_ID).unwrap_or(&IMAGE_WALLPAPERS[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_ids_are_unique() {
        let mut ids: Vec<&str> = image_wallpapers()
            .iter()
            .chain(video_wallpapers())
            .chain(online_wallpapers())
            .map(|entry| entry.id)
            .collect();
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }

    #[test]
    fn default_selection_resolves_to_an_image() {
        let selection = WallpaperSelection::default();
        let entry = resolve_wallpaper(&selection.wallpaper_id).expect("default exists");
        assert_eq!(entry.kind, WallpaperMediaKind::Image);
    }

    #[test]
    fn unknown_id_resolves_to_none() {
        assert!(resolve_wallpaper("nope").is_none());
    }
}

use desktop_app_contract::settings::SettingsState;
use desktop_app_contract::timer::TimerState;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WindowId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AppId {
    Pomodoro,
    Music,
    Asmr,
    Todo,
    Notes,
    Settings,
}

impl AppId {
    pub fn title(self) -> &'static str {
        match self {
            Self::Pomodoro => "Pomodoro",
            Self::Music => "Music",
            Self::Asmr => "ASMR",
            Self::Todo => "To-Do",
            Self::Notes => "Notes",
            Self::Settings => "Settings",
        }
    }

    pub fn default_size(self) -> (i32, i32) {
        match self {
            Self::Pomodoro => (360, 500),
            Self::Music => (400, 500),
            Self::Asmr => (420, 520),
            Self::Todo => (400, 520),
            Self::Notes => (700, 520),
            Self::Settings => (640, 540),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl WindowRect {
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    pub fn clamped_min(self, min_w: i32, min_h: i32) -> Self {
        Self {
            w: self.w.max(min_w),
            h: self.h.max(min_h),
            ..self
        }
    }

    /// Moves the rect so it lies fully inside `viewport`, shrinking only when
    /// it is larger than the viewport itself.
    pub fn contained_in(self, viewport: WindowRect) -> Self {
        let w = self.w.min(viewport.w);
        let h = self.h.min(viewport.h);
        let x = self.x.clamp(viewport.x, viewport.x + viewport.w - w);
        let y = self.y.clamp(viewport.y, viewport.y + viewport.h - h);
        Self { x, y, w, h }
    }

    /// Rect of the given size centered inside `viewport`. The size is capped
    /// at 80% of the viewport so a fresh window never covers the whole desktop.
    pub fn centered_in(viewport: WindowRect, w: i32, h: i32) -> Self {
        let w = w.min(viewport.w * 4 / 5);
        let h = h.min(viewport.h * 4 / 5);
        Self {
            x: viewport.x + (viewport.w - w) / 2,
            y: viewport.y + (viewport.h - h) / 2,
            w,
            h,
        }
        .contained_in(viewport)
    }
}

impl Default for WindowRect {
    fn default() -> Self {
        Self {
            x: 48,
            y: 48,
            w: 420,
            h: 480,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowRecord {
    pub id: WindowId,
    pub app_id: AppId,
    pub title: String,
    pub rect: WindowRect,
    pub restore_rect: Option<WindowRect>,
    pub z_index: u64,
    pub minimized: bool,
    pub maximized: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesktopState {
    pub next_window_id: u64,
    pub next_z_index: u64,
    pub windows: Vec<WindowRecord>,
    pub settings: SettingsState,
    pub timer: TimerState,
}

impl Default for DesktopState {
    fn default() -> Self {
        let settings = SettingsState::default();
        let timer = TimerState::initial(&settings);
        Self {
            next_window_id: 1,
            next_z_index: 1,
            windows: Vec::new(),
            settings,
            timer,
        }
    }
}

impl DesktopState {
    /// Top non-minimized window by stacking order, if any.
    pub fn focused_window_id(&self) -> Option<WindowId> {
        self.windows
            .iter()
            .filter(|w| !w.minimized)
            .max_by_key(|w| w.z_index)
            .map(|w| w.id)
    }

    pub fn window_for_app(&self, app_id: AppId) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| w.app_id == app_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResizeEdge {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    pub window_id: WindowId,
    pub pointer_start: PointerPosition,
    pub rect_start: WindowRect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeSession {
    pub window_id: WindowId,
    pub edge: ResizeEdge,
    pub pointer_start: PointerPosition,
    pub rect_start: WindowRect,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InteractionState {
    pub dragging: Option<DragSession>,
    pub resizing: Option<ResizeSession>,
}

pub mod app_runtime;
pub mod apps;
pub mod components;
pub mod host;
pub mod model;
pub mod persistence;
pub mod reducer;
pub mod runtime_context;

pub use components::{DesktopShell, DOCK_HEIGHT_PX, MENU_BAR_HEIGHT_PX};
pub use model::*;
pub use reducer::{reduce_desktop, DesktopAction, RuntimeEffect};
pub use runtime_context::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext};

//! Runtime provider and context wiring for the desktop shell.
//!
//! This module owns the long-lived reducer container, runtime effect queue,
//! app-session state, and host bootstrap wiring. UI composition stays in
//! [`crate::components`].

use desktop_app_contract::{AppCommand, DesktopHandle, ShellCommand};
use leptos::*;
use platform_host::HostServices;

use crate::{
    app_runtime::{sync_runtime_sessions, AppRuntimeState},
    host::DesktopHostContext,
    model::{DesktopState, InteractionState, WindowId},
    reducer::{reduce_desktop, DesktopAction, RuntimeEffect},
};

#[derive(Clone, Copy)]
/// Leptos context for reading desktop runtime state and dispatching [`DesktopAction`] values.
pub struct DesktopRuntimeContext {
    /// Host service bundle for executing runtime side effects and environment queries.
    pub host: StoredValue<DesktopHostContext>,
    /// Reactive desktop state signal.
    pub state: RwSignal<DesktopState>,
    /// Reactive pointer/drag/resize interaction state signal.
    pub interaction: RwSignal<InteractionState>,
    /// Queue of runtime effects emitted by the reducer and processed by the shell.
    pub effects: RwSignal<Vec<RuntimeEffect>>,
    /// Runtime app-session state.
    pub app_runtime: RwSignal<AppRuntimeState>,
    /// Reducer dispatch callback.
    pub dispatch: Callback<DesktopAction>,
}

impl DesktopRuntimeContext {
    /// Dispatches a reducer action through the runtime context callback.
    pub fn dispatch_action(&self, action: DesktopAction) {
        self.dispatch.call(action);
    }

    /// Handles a command sent by the app mounted in `window_id`.
    pub fn handle_app_command(&self, window_id: WindowId, command: AppCommand) {
        match command {
            AppCommand::SetWindowTitle { title } => {
                self.state.update(|state| {
                    if let Some(window) = state.windows.iter_mut().find(|w| w.id == window_id) {
                        window.title = title;
                    }
                });
            }
            AppCommand::CloseSelf => {
                self.dispatch_action(DesktopAction::CloseWindow { window_id });
            }
            AppCommand::Notify { title, body } => {
                let mut queue = self.effects.get_untracked();
                queue.push(RuntimeEffect::Notify { title, body });
                self.effects.set(queue);
            }
        }
    }
}

fn install_runtime_orchestration(runtime: DesktopRuntimeContext) {
    let host = runtime.host.get_value();
    host.install_boot_hydration(runtime.dispatch);
    host.install_timer_interval(runtime.dispatch);
    host.install_viewport_listener(runtime.dispatch);
    install_effect_drain(runtime);
}

/// Drains reducer-emitted effects in dispatch order. The queue is emptied
/// before any effect runs: an effect that dispatches again must land its
/// follow-up effects in a fresh batch, not the one being drained.
fn install_effect_drain(runtime: DesktopRuntimeContext) {
    create_effect(move |_| {
        let drained = runtime.effects.get();
        if drained.is_empty() {
            return;
        }
        runtime.effects.set(Vec::new());

        let host = runtime.host.get_value();
        for effect in drained {
            host.run_runtime_effect(runtime, effect);
        }
    });
}

fn shell_command_to_action(command: ShellCommand) -> DesktopAction {
    match command {
        ShellCommand::StartTimer => DesktopAction::TimerStart {
            now_ms: platform_host::unix_time_ms_now(),
        },
        ShellCommand::PauseTimer => DesktopAction::TimerPause {
            now_ms: platform_host::unix_time_ms_now(),
        },
        ShellCommand::ResetTimer => DesktopAction::TimerReset,
        ShellCommand::SwitchTimerMode(mode) => DesktopAction::TimerSwitchMode { mode },
        ShellCommand::ApplySettings(settings) => DesktopAction::ApplySettings { settings },
    }
}

#[component]
/// Provides [`DesktopRuntimeContext`] to descendant components and boots persisted state.
pub fn DesktopProvider(
    /// Injected browser host bundle assembled by the entry layer.
    host_services: HostServices,
    children: Children,
) -> impl IntoView {
    let host = store_value(DesktopHostContext::new(host_services.clone()));
    let state = create_rw_signal(DesktopState::default());
    let interaction = create_rw_signal(InteractionState::default());
    let effects = create_rw_signal(Vec::<RuntimeEffect>::new());
    let app_runtime = create_rw_signal(AppRuntimeState::default());

    let dispatch = Callback::new(move |action: DesktopAction| {
        let mut desktop = state.get_untracked();
        let mut ui = interaction.get_untracked();
        let previous_desktop = desktop.clone();
        let previous_ui = ui.clone();

        let new_effects = reduce_desktop(&mut desktop, &mut ui, action);
        if desktop.windows != previous_desktop.windows {
            sync_runtime_sessions(app_runtime, &previous_desktop.windows, &desktop.windows);
        }
        if desktop != previous_desktop {
            state.set(desktop);
        }
        if ui != previous_ui {
            interaction.set(ui);
        }
        if !new_effects.is_empty() {
            let mut queue = effects.get_untracked();
            queue.extend(new_effects);
            effects.set(queue);
        }
    });

    let runtime = DesktopRuntimeContext {
        host,
        state,
        interaction,
        effects,
        app_runtime,
        dispatch,
    };

    provide_context(runtime);
    provide_context(host_services);
    provide_context(DesktopHandle {
        settings: Signal::derive(move || state.get().settings),
        timer: Signal::derive(move || state.get().timer),
        commands: Callback::new(move |command: ShellCommand| {
            dispatch.call(shell_command_to_action(command));
        }),
    });

    install_runtime_orchestration(runtime);

    children().into_view()
}

/// Returns the current [`DesktopRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`DesktopProvider`].
pub fn use_desktop_runtime() -> DesktopRuntimeContext {
    use_context::<DesktopRuntimeContext>().expect("DesktopRuntimeContext not provided")
}

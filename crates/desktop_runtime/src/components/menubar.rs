use super::*;
use leptos::logging;
use platform_host::{AuthStatus, HostServices};

fn locale_clock_text() -> String {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::new_0().to_locale_time_string("default").into()
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        String::from("--:--")
    }
}

fn install_clock(clock: RwSignal<String>) {
    #[cfg(target_arch = "wasm32")]
    {
        leptos::set_interval(
            move || clock.set(locale_clock_text()),
            std::time::Duration::from_secs(1),
        );
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = clock;
    }
}

#[component]
pub(super) fn MenuBar() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let auth_status = use_context::<RwSignal<AuthStatus>>();
    let services = use_context::<HostServices>();

    let clock = create_rw_signal(locale_clock_text());
    install_clock(clock);

    let user_email = move || {
        auth_status
            .and_then(|status| status.get().user().map(|user| user.email.clone()))
            .unwrap_or_default()
    };
    let timer_summary = move || {
        let timer = runtime.state.get().timer;
        if timer.is_running {
            format!(
                "{} {:02}:{:02}",
                timer.mode.label(),
                timer.time_left_secs / 60,
                timer.time_left_secs % 60
            )
        } else {
            String::new()
        }
    };

    let sign_out = Callback::new(move |_: ()| {
        let Some(services) = services.clone() else {
            return;
        };
        let Some(status) = auth_status else {
            return;
        };
        // Leaving the desktop silences every channel, whichever app owns it.
        services.audio.stop_all();
        spawn_local(async move {
            if let Err(err) = services.auth.sign_out().await {
                logging::warn!("sign out failed: {err}");
            }
            status.set(AuthStatus::SignedOut);
        });
    });

    view! {
        <header class="menu-bar" role="banner">
            <span class="menu-bar-brand">"StudyDesk"</span>
            <span class="menu-bar-timer">{timer_summary}</span>
            <div class="menu-bar-session">
                <span class="menu-bar-user">{user_email}</span>
                <Show when=move || auth_status.is_some() fallback=|| ()>
                    <button class="menu-bar-sign-out" on:click=move |_| sign_out.call(())>
                        "Sign out"
                    </button>
                </Show>
            </div>
            <time class="menu-bar-clock">{move || clock.get()}</time>
        </header>
    }
}

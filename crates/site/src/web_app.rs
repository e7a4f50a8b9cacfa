use desktop_runtime::{DesktopProvider, DesktopShell};
use leptos::*;
use leptos_meta::*;
use leptos_router::*;
use platform_host::{AuthError, AuthStatus, HostServices};

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();

    let services = platform_host_web::host_services();
    let auth_status = create_rw_signal(AuthStatus::Loading);
    provide_context(services.clone());
    provide_context(auth_status);

    // Resolve the persisted session once at boot; routes stay gated on
    // `Loading` until this lands. The session cookie is the route guard's
    // credential: without it there is no session worth resolving.
    let auth = services.auth.clone();
    spawn_local(async move {
        if !platform_host_web::session_cookie_present() {
            auth_status.set(AuthStatus::SignedOut);
            return;
        }
        match auth.current_user().await {
            Some(user) => auth_status.set(AuthStatus::SignedIn(user)),
            None => auth_status.set(AuthStatus::SignedOut),
        }
    });

    view! {
        <Title text="StudyDesk" />
        <Meta name="description" content="A browser desktop for focused study sessions." />

        <Router>
            <main class="site-root">
                <Routes>
                    <Route path="" view=DesktopEntry />
                    <Route path="/login" view=LoginRoute />
                    <Route path="/register" view=RegisterRoute />
                </Routes>
            </main>
        </Router>
    }
}

#[component]
pub fn DesktopEntry() -> impl IntoView {
    let services = expect_context::<HostServices>();
    let auth_status = expect_context::<RwSignal<AuthStatus>>();

    let navigate = use_navigate();
    create_effect(move |_| {
        if auth_status.get() == AuthStatus::SignedOut {
            navigate("/login", Default::default());
        }
    });

    move || match auth_status.get() {
        AuthStatus::Loading => view! { <BootScreen /> }.into_view(),
        AuthStatus::SignedOut => ().into_view(),
        AuthStatus::SignedIn(_) => view! {
            <DesktopProvider host_services=services.clone()>
                <DesktopShell />
            </DesktopProvider>
        }
        .into_view(),
    }
}

#[component]
fn BootScreen() -> impl IntoView {
    view! {
        <div class="boot-screen">
            <p>"Loading StudyDesk…"</p>
        </div>
    }
}

#[component]
fn LoginRoute() -> impl IntoView {
    view! { <AuthPage register=false /> }
}

#[component]
fn RegisterRoute() -> impl IntoView {
    view! { <AuthPage register=true /> }
}

#[component]
fn AuthPage(register: bool) -> impl IntoView {
    let services = expect_context::<HostServices>();
    let auth_status = expect_context::<RwSignal<AuthStatus>>();

    let navigate = use_navigate();
    create_effect(move |_| {
        if auth_status.get().user().is_some() {
            navigate("/", Default::default());
        }
    });

    let email = create_rw_signal(String::new());
    let password = create_rw_signal(String::new());
    let error = create_rw_signal::<Option<String>>(None);
    let pending = create_rw_signal(false);

    let auth_for_submit = services.auth.clone();
    let submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }
        let email = email.get_untracked().trim().to_string();
        let password = password.get_untracked();
        if email.is_empty() || password.is_empty() {
            error.set(Some(AuthError::InvalidCredentials.to_string()));
            return;
        }
        pending.set(true);
        let auth = auth_for_submit.clone();
        spawn_local(async move {
            let result = if register {
                auth.sign_up(&email, &password).await
            } else {
                auth.sign_in(&email, &password).await
            };
            match result {
                Ok(user) => {
                    error.set(None);
                    auth_status.set(AuthStatus::SignedIn(user));
                }
                Err(err) => error.set(Some(err.to_string())),
            }
            pending.set(false);
        });
    };

    let auth_for_popup = services.auth.clone();
    let popup_sign_in = move |_| {
        if pending.get_untracked() {
            return;
        }
        pending.set(true);
        let auth = auth_for_popup.clone();
        spawn_local(async move {
            match auth.sign_in_with_popup().await {
                Ok(user) => {
                    error.set(None);
                    auth_status.set(AuthStatus::SignedIn(user));
                }
                Err(err) => error.set(Some(err.to_string())),
            }
            pending.set(false);
        });
    };

    let heading = if register { "Create account" } else { "Sign in" };
    let submit_label = if register { "Register" } else { "Sign in" };

    view! {
        <section class="auth-page">
            <h1>{heading}</h1>
            <form class="auth-form" on:submit=submit>
                <label>
                    <span>"Email"</span>
                    <input
                        type="email"
                        autocomplete="email"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                </label>
                <label>
                    <span>"Password"</span>
                    <input
                        type="password"
                        autocomplete=if register { "new-password" } else { "current-password" }
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                </label>

                <Show when=move || error.get().is_some() fallback=|| ()>
                    <p class="auth-error" role="alert">
                        {move || error.get().unwrap_or_default()}
                    </p>
                </Show>

                <button type="submit" disabled=move || pending.get()>
                    {submit_label}
                </button>
            </form>

            <Show when=move || !register fallback=|| ()>
                <button
                    class="auth-popup"
                    disabled=move || pending.get()
                    on:click=popup_sign_in.clone()
                >
                    "Continue with Google"
                </button>
            </Show>

            <p class="auth-switch">
                {if register {
                    view! { <A href="/login">"Already have an account? Sign in"</A> }.into_view()
                } else {
                    view! { <A href="/register">"Need an account? Register"</A> }.into_view()
                }}
            </p>
        </section>
    }
}

//! Web Notifications adapter.

use platform_host::{NotificationFuture, NotificationService};

#[derive(Debug, Clone, Copy, Default)]
/// Browser notification adapter using the Web Notifications API.
pub struct WebNotificationService;

impl NotificationService for WebNotificationService {
    fn notify<'a>(
        &'a self,
        title: &'a str,
        body: &'a str,
    ) -> NotificationFuture<'a, Result<(), String>> {
        Box::pin(async move {
            #[cfg(target_arch = "wasm32")]
            {
                use wasm_bindgen_futures::JsFuture;
                use web_sys::{Notification, NotificationOptions, NotificationPermission};

                let mut permission = Notification::permission();
                if permission == NotificationPermission::Default {
                    let request = Notification::request_permission()
                        .map_err(|err| format!("permission request failed: {err:?}"))?;
                    JsFuture::from(request)
                        .await
                        .map_err(|err| format!("permission request failed: {err:?}"))?;
                    permission = Notification::permission();
                }
                if permission != NotificationPermission::Granted {
                    return Err("notification permission denied".to_string());
                }

                let options = NotificationOptions::new();
                options.set_body(body);
                Notification::new_with_options(title, &options)
                    .map(|_| ())
                    .map_err(|err| format!("notification dispatch failed: {err:?}"))
            }

            #[cfg(not(target_arch = "wasm32"))]
            {
                let _ = (title, body);
                Ok(())
            }
        })
    }
}

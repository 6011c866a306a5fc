use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_query_map};
use parley_types::validators::validate_phone;
use parley_types::Session;

use crate::router::REDIRECT_PARAM;

/// Only same-site paths are honoured as post-login targets. Browsers read
/// `/\host` as `//host` and drop tabs and newlines, so those are refused too.
fn redirect_target(requested: Option<String>) -> String {
    requested
        .filter(|target| is_local_path(target))
        .unwrap_or_else(|| "/".to_string())
}

fn is_local_path(target: &str) -> bool {
    let mut chars = target.chars();
    chars.next() == Some('/')
        && !matches!(chars.next(), Some('/' | '\\'))
        && !target.chars().any(char::is_control)
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = expect_context::<Session>();
    let query = use_query_map();
    let navigate = use_navigate();

    let (phone, setPhone) = signal(String::new());
    let (password, setPassword) = signal(String::new());
    let (errorMessage, setErrorMessage) = signal(Option::<String>::None);
    #[allow(unused_variables)]
    let (pending, setPending) = signal(false);

    let onSubmit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let phoneValue = phone.get_untracked();
        if !validate_phone(&phoneValue) {
            setErrorMessage.set(Some("Enter a valid 11-digit mobile number".into()));
            return;
        }
        let passwordValue = password.get_untracked();
        if passwordValue.is_empty() {
            setErrorMessage.set(Some("Enter your password".into()));
            return;
        }
        setErrorMessage.set(None);

        #[allow(unused_variables)]
        let target = redirect_target(
            query.with_untracked(|params| params.get(REDIRECT_PARAM).map(|value| value.to_string())),
        );

        #[cfg(feature = "csr")]
        {
            use parley_client::api::user;
            use parley_client::{ClientConfig, HttpClient};
            use parley_types::PasswordLoginRequest;
            use wasm_bindgen_futures::spawn_local;

            let session = session.clone();
            let navigate = navigate.clone();
            setPending.set(true);
            spawn_local(async move {
                let payload = PasswordLoginRequest {
                    phone: phoneValue,
                    password: passwordValue,
                };
                let result = match HttpClient::new(ClientConfig::default(), session.clone()) {
                    Ok(client) => user::password_login(&client, &payload).await,
                    Err(e) => Err(e),
                };
                setPending.set(false);

                match result {
                    Ok(login) => {
                        session.sign_in(&login.token);
                        navigate(&target, Default::default());
                    }
                    Err(e) => setErrorMessage.set(Some(e.to_string())),
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (&session, &navigate);
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <div class="login-header">
                    <div class="login-icon">"P"</div>
                    <h1>"Parley"</h1>
                    <p>"Sign in with your mobile number"</p>
                </div>

                {move || {
                    errorMessage
                        .get()
                        .map(|message| view! { <div class="login-error">{message}</div> })
                }}

                <form on:submit=onSubmit>
                    <div class="form-group">
                        <label for="phone">"Mobile Number"</label>
                        <input
                            type="tel"
                            id="phone"
                            name="phone"
                            placeholder="11-digit mobile number"
                            required
                            prop:value=phone
                            on:input=move |ev| setPhone.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="form-group">
                        <label for="password">"Password"</label>
                        <input
                            type="password"
                            id="password"
                            name="password"
                            placeholder="Enter your password"
                            required
                            prop:value=password
                            on:input=move |ev| setPassword.set(event_target_value(&ev))
                        />
                    </div>
                    <button type="submit" class="btn btn-primary" disabled=move || pending.get()>
                        {move || if pending.get() { "Signing In..." } else { "Sign In" }}
                    </button>
                </form>
            </div>
        </div>
    }
}

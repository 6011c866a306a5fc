use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use parley_types::Session;

use crate::router::LOGIN_PATH;

#[component]
pub fn Nav() -> impl IntoView {
    let session = expect_context::<Session>();
    let navigate = use_navigate();

    let onSignOut = move |_| {
        session.sign_out();
        navigate(LOGIN_PATH, Default::default());
    };

    view! {
        <nav class="nav-sidebar">
            <div class="nav-brand">
                <div class="brand-icon">"P"</div>
                <span class="brand-text">"Parley"</span>
            </div>
            <ul class="nav-links">
                <li class="nav-item">
                    <a href="/">"Home"</a>
                </li>
                <li class="nav-item">
                    <a href="/chat">"Chat"</a>
                </li>
                <li class="nav-item">
                    <a href="/test">"Test"</a>
                </li>
            </ul>
            <button class="btn nav-signout" on:click=onSignOut>
                "Sign Out"
            </button>
        </nav>
    }
}

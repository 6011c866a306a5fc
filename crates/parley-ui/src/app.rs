use leptos::prelude::*;
use leptos_router::{
    components::{Route, Router, Routes},
    StaticSegment,
};

use crate::components::guarded::Guarded;
use crate::components::nav::Nav;
use crate::pages::login::LoginPage;
use crate::router::{AuthGuard, DocumentTitle, RouteTable};
use crate::storage::browser_session;

#[component]
pub fn App() -> impl IntoView {
    let session = browser_session();
    provide_context(AuthGuard::new(
        RouteTable::default(),
        session.clone(),
        DocumentTitle,
    ));
    provide_context(session);

    view! {
        <Router>
            <Routes fallback=|| view! { <p>"Page not found."</p> }.into_any()>
                <Route path=StaticSegment("") view=HomeView />
                <Route path=StaticSegment("login") view=LoginView />
                <Route path=StaticSegment("test") view=TestView />
                <Route path=StaticSegment("chat") view=ChatView />
            </Routes>
        </Router>
    }
}

#[component]
fn HomeView() -> impl IntoView {
    view! {
        <Guarded>
            <div class="app-layout">
                <Nav />
                <main class="main-content">
                    <h1>"Parley"</h1>
                </main>
            </div>
        </Guarded>
    }
}

#[component]
fn LoginView() -> impl IntoView {
    view! {
        <Guarded>
            <LoginPage />
        </Guarded>
    }
}

#[component]
fn TestView() -> impl IntoView {
    view! {
        <Guarded>
            <div class="app-layout">
                <Nav />
                <main class="main-content">
                    <h1>"Test Page"</h1>
                </main>
            </div>
        </Guarded>
    }
}

#[component]
fn ChatView() -> impl IntoView {
    view! {
        <Guarded>
            <div class="app-layout">
                <Nav />
                <main class="main-content">
                    <h1>"Chat"</h1>
                </main>
            </div>
        </Guarded>
    }
}

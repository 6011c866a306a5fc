use leptos::prelude::*;
use leptos_router::hooks::{use_location, use_navigate};
use leptos_router::NavigateOptions;

use crate::router::{full_path, AuthGuard, DocumentTitle, Navigation};

/// Renders its children only once the route guard lets the current location
/// through; otherwise replaces the location with the guard's redirect.
#[component]
pub fn Guarded(children: ChildrenFn) -> impl IntoView {
    let guard = expect_context::<AuthGuard<DocumentTitle>>();
    let location = use_location();
    let navigate = use_navigate();
    let (allowed, setAllowed) = signal(false);

    Effect::new(move |_| {
        let fullPath = full_path(
            &location.pathname.get(),
            &location.search.get(),
            &location.hash.get(),
        );
        match guard.navigate(&fullPath) {
            Navigation::Allow => setAllowed.set(true),
            Navigation::Redirect(target) => {
                setAllowed.set(false);
                navigate(
                    &target,
                    NavigateOptions {
                        replace: true,
                        ..Default::default()
                    },
                );
            }
        }
    });

    move || allowed.get().then(|| children())
}

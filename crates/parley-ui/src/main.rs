#[cfg(feature = "csr")]
fn main() {
    console_error_panic_hook::set_once();
    leptos::mount::mount_to_body(parley_ui::App);
}

#[cfg(not(feature = "csr"))]
fn main() {}

use autoreply_client::Session;
use autoreply_client::guard::Redirect;
use dioxus::prelude::*;

mod browser;
mod components;
mod pages;

use browser::LocalStorageStore;
use components::{Protected, PublicOnly, Shell};
use pages::{Dashboard, DraftDetail, Drafts, GmailCallback, Login, NotFound, Register, Settings};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Shell)]
        #[layout(PublicOnly)]
            #[route("/login")]
            Login {},
            #[route("/register")]
            Register {},
        #[end_layout]
        #[layout(Protected)]
            #[route("/dashboard")]
            Dashboard {},
            #[route("/drafts")]
            Drafts {},
            #[route("/drafts/:id")]
            DraftDetail { id: String },
            #[route("/settings?:gmail&:error")]
            Settings { gmail: String, error: String },
            #[route("/gmail/callback?:code&:error")]
            GmailCallback { code: String, error: String },
        #[end_layout]
    #[end_layout]
    #[redirect("/", || Route::Dashboard {})]
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

impl From<Redirect> for Route {
    fn from(redirect: Redirect) -> Self {
        match redirect {
            Redirect::Login => Route::Login {},
            Redirect::Dashboard => Route::Dashboard {},
        }
    }
}

const FAVICON: Asset = asset!("/assets/favicon.ico");
const MAIN_CSS: Asset = asset!("/assets/main.css");
const TAILWIND_CSS: Asset = asset!("/assets/tailwind.css");

fn main() {
    dioxus::logger::init(tracing::Level::INFO).expect("failed to init logger");
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    use_context_provider(|| Session::new(LocalStorageStore));

    rsx! {
        document::Link { rel: "icon", href: FAVICON }
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        document::Link { rel: "stylesheet", href: TAILWIND_CSS }
        Router::<Route> {}
    }
}

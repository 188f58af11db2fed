use dioxus::prelude::*;

use crate::Route;

#[component]
pub fn NavBar(title: String, back: Option<Route>, children: Element) -> Element {
    rsx! {
        nav {
            class: "bg-blue-700 text-white",
            div {
                class: "container mx-auto px-4 py-3 flex items-center gap-4",
                if let Some(back) = back {
                    Link {
                        class: "text-sm hover:underline",
                        to: back,
                        "← Back"
                    }
                }
                h1 {
                    class: "text-xl font-semibold flex-grow",
                    "{title}"
                }
                {children}
            }
        }
    }
}

use dioxus::prelude::*;

use crate::Route;

#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let path = segments.join("/");

    rsx! {
        div {
            class: "container mx-auto px-4 py-16 max-w-md text-center",
            h1 {
                class: "text-3xl font-bold mb-4",
                "Page not found"
            }
            p {
                class: "text-gray-600 mb-8",
                "Nothing lives at /{path}."
            }
            Link {
                class: "text-blue-700 hover:underline",
                to: Route::Dashboard {},
                "Back to the dashboard"
            }
        }
    }
}

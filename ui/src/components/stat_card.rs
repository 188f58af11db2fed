use dioxus::prelude::*;

#[component]
pub fn StatCard(label: String, value: String) -> Element {
    rsx! {
        div {
            class: "bg-white border border-gray-200 rounded-lg p-6 shadow-sm",
            div {
                class: "text-sm text-gray-500 mb-1",
                "{label}"
            }
            div {
                class: "text-3xl font-bold text-gray-900",
                "{value}"
            }
        }
    }
}

//! Account Selector Component
//!
//! Dropdown listing tracked accounts. The selected value is owned by the
//! caller; the component only tracks whether the list is open.

use leptos::*;

/// Placeholder shown when nothing is selected
pub const PLACEHOLDER: &str = "Select an account...";

/// Open/closed state of the dropdown
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SelectorState {
    pub open: bool,
}

impl SelectorState {
    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Picking an option always closes the list
    pub fn choose(&mut self) {
        self.open = false;
    }
}

/// Button text for the current selection
pub fn selector_label(selected: Option<&str>) -> String {
    match selected {
        Some(account) => format!("@{}", account),
        None => PLACEHOLDER.to_string(),
    }
}

pub fn is_selected_option(option: &str, selected: Option<&str>) -> bool {
    selected == Some(option)
}

/// Account dropdown
#[component]
pub fn AccountSelector(
    /// Options to list
    #[prop(into)]
    accounts: Signal<Vec<String>>,
    /// Currently selected handle
    #[prop(into)]
    selected: Signal<Option<String>>,
    /// Invoked with the chosen handle
    on_select: Callback<String>,
) -> impl IntoView {
    let selector = create_rw_signal(SelectorState::default());

    view! {
        <div class="relative w-full md:w-72">
            <button
                type="button"
                class="w-full flex items-center justify-between px-4 py-2 bg-white border border-gray-300 rounded-lg shadow-sm hover:border-gray-400"
                on:click=move |_| selector.update(|s| s.toggle())
            >
                <span class=move || {
                    if selected.get().is_some() { "text-gray-900" } else { "text-gray-400" }
                }>
                    {move || selector_label(selected.get().as_deref())}
                </span>
                <span class="text-gray-400">{move || if selector.get().open { "▲" } else { "▼" }}</span>
            </button>

            {move || {
                if !selector.get().open {
                    return view! {}.into_view();
                }

                let current = selected.get();
                view! {
                    <ul class="absolute z-10 mt-1 w-full bg-white border border-gray-200 rounded-lg shadow-lg max-h-64 overflow-auto">
                        {accounts.get()
                            .into_iter()
                            .map(|account| {
                                let highlighted = is_selected_option(&account, current.as_deref());
                                let label = format!("@{}", account);
                                view! {
                                    <li
                                        class=if highlighted {
                                            "px-4 py-2 cursor-pointer bg-blue-50 text-blue-700 font-medium"
                                        } else {
                                            "px-4 py-2 cursor-pointer hover:bg-gray-100"
                                        }
                                        on:click=move |_| {
                                            on_select.call(account.clone());
                                            selector.update(|s| s.choose());
                                        }
                                    >
                                        {label}
                                    </li>
                                }
                            })
                            .collect_view()}
                    </ul>
                }.into_view()
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_and_choose() {
        let mut state = SelectorState::default();
        assert!(!state.open);

        state.toggle();
        assert!(state.open);

        state.choose();
        assert!(!state.open);

        state.toggle();
        state.toggle();
        assert!(!state.open);
    }

    #[test]
    fn test_label_and_highlight() {
        assert_eq!(selector_label(None), "Select an account...");
        assert_eq!(selector_label(Some("acme")), "@acme");

        assert!(is_selected_option("acme", Some("acme")));
        assert!(!is_selected_option("zeta", Some("acme")));
        assert!(!is_selected_option("acme", None));
    }
}

//! Stats Card Component
//!
//! Displays a single engagement total with an icon.

use leptos::*;

/// Accent colour of a card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatColor {
    Blue,
    Red,
    Green,
    Purple,
    Yellow,
}

impl StatColor {
    /// Tailwind classes for the icon badge
    pub fn badge_class(&self) -> &'static str {
        match self {
            StatColor::Blue => "bg-blue-100 text-blue-600",
            StatColor::Red => "bg-red-100 text-red-600",
            StatColor::Green => "bg-green-100 text-green-600",
            StatColor::Purple => "bg-purple-100 text-purple-600",
            StatColor::Yellow => "bg-yellow-100 text-yellow-600",
        }
    }
}

/// Stat card
#[component]
pub fn StatsCard(
    #[prop(into)]
    title: String,
    /// Already formatted value
    #[prop(into)]
    value: Signal<String>,
    icon: &'static str,
    color: StatColor,
) -> impl IntoView {
    view! {
        <div class="bg-white rounded-xl shadow-sm border border-gray-200 p-5 flex items-center space-x-4">
            <div class=format!("w-12 h-12 rounded-full flex items-center justify-center text-xl {}", color.badge_class())>
                {icon}
            </div>
            <div>
                <div class="text-sm text-gray-500">{title}</div>
                <div class="text-2xl font-bold">{move || value.get()}</div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badge_classes_are_distinct() {
        let colors = [
            StatColor::Blue,
            StatColor::Red,
            StatColor::Green,
            StatColor::Purple,
            StatColor::Yellow,
        ];
        let mut classes: Vec<_> = colors.iter().map(|c| c.badge_class()).collect();
        classes.sort();
        classes.dedup();
        assert_eq!(classes.len(), colors.len());
        assert!(StatColor::Red.badge_class().contains("red"));
    }
}

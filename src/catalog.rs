// Suggested topics shown to users who don't know what to search for.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TopicSuggestion {
    pub name: &'static str,
    pub icon: &'static str,
}

const TOPICS: [TopicSuggestion; 8] = [
    TopicSuggestion { name: "Artificial Intelligence", icon: "🤖" },
    TopicSuggestion { name: "Climate Change", icon: "🌍" },
    TopicSuggestion { name: "Cryptocurrency", icon: "💰" },
    TopicSuggestion { name: "Electric Vehicles", icon: "🚗" },
    TopicSuggestion { name: "Space Exploration", icon: "🚀" },
    TopicSuggestion { name: "Mental Health", icon: "🧠" },
    TopicSuggestion { name: "Remote Work", icon: "💼" },
    TopicSuggestion { name: "Education", icon: "📚" },
];

/// The fixed list of suggested topics, in display order.
pub fn suggestion_topics() -> &'static [TopicSuggestion] {
    &TOPICS
}

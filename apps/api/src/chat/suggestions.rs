//! Follow-up suggestions — a static table from primary intent to exactly
//! three canned next questions, with a default trio for everything else.

use crate::chat::intent::Intent;

const DEFAULT_SUGGESTIONS: [&str; 3] = [
    "Tell me more about Aryan's projects",
    "What are Aryan's key skills?",
    "Is Aryan available for work?",
];

/// Returns exactly three follow-up questions for the given primary intent.
pub fn follow_ups(intent: Intent) -> [&'static str; 3] {
    match intent {
        Intent::About => [
            "What projects has Aryan worked on?",
            "Tell me about Aryan's technical skills",
            "What's Aryan's work experience?",
        ],
        Intent::Projects => [
            "How can I see the live demos?",
            "What technologies were used?",
            "Tell me about Aryan's other projects",
        ],
        Intent::Skills => [
            "What projects showcase these skills?",
            "Tell me about Aryan's AI/ML experience",
            "What's Aryan's cloud experience?",
        ],
        Intent::Experience => [
            "What were the key achievements?",
            "Tell me about Aryan's current role",
            "What technologies were used at work?",
        ],
        Intent::Education => [
            "What's Aryan's current status?",
            "Tell me about Aryan's projects",
            "Is Aryan available for work?",
        ],
        Intent::Contact => [
            "Is Aryan available for interviews?",
            "What's Aryan's location?",
            "Tell me about Aryan's work permit status",
        ],
        Intent::Availability => [
            "What type of roles is Aryan looking for?",
            "Tell me about Aryan's technical skills",
            "What's Aryan's experience level?",
        ],
        Intent::Greeting | Intent::Technical | Intent::Navigation | Intent::General => {
            DEFAULT_SUGGESTIONS
        }
    }
}

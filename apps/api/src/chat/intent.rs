//! Intent classification — a fixed ordered table of regex predicates over the
//! lower-cased question. Order is significant: the first match is the primary
//! intent, and `general` is the fallback when nothing matches.

use once_cell::sync::Lazy;
use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Greeting,
    About,
    Projects,
    Skills,
    Experience,
    Education,
    Contact,
    Availability,
    Technical,
    Navigation,
    General,
}

impl Intent {
    pub fn as_str(self) -> &'static str {
        match self {
            Intent::Greeting => "greeting",
            Intent::About => "about",
            Intent::Projects => "projects",
            Intent::Skills => "skills",
            Intent::Experience => "experience",
            Intent::Education => "education",
            Intent::Contact => "contact",
            Intent::Availability => "availability",
            Intent::Technical => "technical",
            Intent::Navigation => "navigation",
            Intent::General => "general",
        }
    }
}

/// Classification table. Evaluation and tie-break both follow this order.
static CLASSIFIER_TABLE: Lazy<Vec<(Intent, Regex)>> = Lazy::new(|| {
    [
        (
            Intent::Greeting,
            r"^(hi|hello|hey|good morning|good afternoon|good evening)",
        ),
        (Intent::About, r"^(tell me about|who is|what about|about aryan)"),
        (
            Intent::Projects,
            r"(project|github|repository|code|built|developed)",
        ),
        (
            Intent::Skills,
            r"(skill|technology|tech|programming|language|framework)",
        ),
        (
            Intent::Experience,
            r"(experience|work|job|career|employment|company)",
        ),
        (
            Intent::Education,
            r"(education|university|degree|study|school|concordia|amity)",
        ),
        (
            Intent::Contact,
            r"(contact|email|phone|linkedin|github|reach|connect)",
        ),
        (
            Intent::Availability,
            r"(available|hiring|job|position|work|relocate|canada)",
        ),
        (
            Intent::Technical,
            r"(how|what|why|explain|describe|implement|build)",
        ),
        (Intent::Navigation, r"(section|page|scroll|go to|show me)"),
    ]
    .into_iter()
    .map(|(intent, pattern)| {
        (
            intent,
            Regex::new(pattern).expect("classifier pattern must compile"),
        )
    })
    .collect()
});

/// Returns every matching intent, in table order. Pure and deterministic.
pub fn classify(question: &str) -> Vec<Intent> {
    let q = question.to_lowercase();
    CLASSIFIER_TABLE
        .iter()
        .filter(|(_, pattern)| pattern.is_match(&q))
        .map(|(intent, _)| *intent)
        .collect()
}

/// First matched intent, or `General` when the set is empty.
pub fn primary_intent(matched: &[Intent]) -> Intent {
    matched.first().copied().unwrap_or(Intent::General)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greeting_matches_only_at_start() {
        assert_eq!(primary_intent(&classify("Hello there")), Intent::Greeting);
        assert_ne!(primary_intent(&classify("say hello to him")), Intent::Greeting);
    }

    #[test]
    fn test_classification_is_case_insensitive() {
        assert_eq!(classify("WHAT PROJECTS HAS HE BUILT?"), classify("what projects has he built?"));
    }

    #[test]
    fn test_classification_is_deterministic() {
        let question = "Tell me about the projects and skills";
        assert_eq!(classify(question), classify(question));
    }

    #[test]
    fn test_no_match_falls_back_to_general() {
        let matched = classify("zzz qqq");
        assert!(matched.is_empty());
        assert_eq!(primary_intent(&matched), Intent::General);
    }

    #[test]
    fn test_primary_intent_uses_table_order() {
        // "what ... projects" matches both projects and technical;
        // projects sits earlier in the table and wins.
        let matched = classify("what projects did he develop?");
        assert!(matched.contains(&Intent::Projects));
        assert!(matched.contains(&Intent::Technical));
        assert_eq!(primary_intent(&matched), Intent::Projects);
    }

    #[test]
    fn test_multi_intent_question_keeps_table_order() {
        let matched = classify("how can I contact him about work experience?");
        let position = |i: Intent| matched.iter().position(|&m| m == i).unwrap();
        assert!(position(Intent::Experience) < position(Intent::Contact));
        assert!(position(Intent::Contact) < position(Intent::Technical));
    }

    #[test]
    fn test_education_keywords() {
        assert_eq!(
            primary_intent(&classify("where did he go to university?")),
            Intent::Education
        );
    }

    #[test]
    fn test_navigation_keywords() {
        assert_eq!(
            primary_intent(&classify("scroll down please")),
            Intent::Navigation
        );
    }

    #[test]
    fn test_availability_keywords() {
        assert_eq!(
            primary_intent(&classify("is he available right now?")),
            Intent::Availability
        );
    }
}

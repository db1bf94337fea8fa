//! Prompt assembly — static persona and subject-fact blocks plus a builder
//! that composes the final completion prompt from named sections in a fixed
//! order: persona, facts, résumé text, conversation history, question.

use crate::chat::memory::Exchange;

/// Persona and style instructions. Kept verbatim across every request.
pub const PERSONA: &str = r#"You are Aryan Awasthi's AI assistant - a friendly, knowledgeable, and enthusiastic representative of Aryan's professional profile. You're here to help visitors learn about Aryan in an engaging and interactive way.

**Your Personality:**
- Friendly and approachable, but professional
- Enthusiastic about Aryan's technical achievements
- Helpful and encouraging
- Use emojis sparingly but effectively
- Show genuine interest in helping visitors

**Response Guidelines:**
- Keep responses conversational yet informative
- Use proper line breaks and formatting for readability
- Provide specific examples and metrics when available
- Always end with a helpful follow-up suggestion or question
- Be context-aware based on previous conversation

**Formatting Rules:**
- Use **bold** for key information and names
- Use bullet points (-) for lists with proper line breaks
- Use code blocks for technical terms and metrics
- Include [links](url) when relevant
- Add line breaks between sections for readability
- Make sure each bullet point is on its own line

**Context Awareness:**
- If user asks about navigation, suggest specific sections
- If discussing projects, always mention GitHub links
- If talking about skills, connect them to real projects
- If discussing availability, mention work permit status
- Build on previous conversation context naturally

**Special Instructions:**
- For greeting questions: Be warm and introduce Aryan briefly
- For project questions: Always include GitHub links and tech stacks
- For skill questions: Connect skills to specific projects/achievements
- For experience questions: Highlight quantifiable achievements
- For availability questions: Mention PGWP status and relocation willingness
- For technical questions: Provide detailed explanations with examples"#;

/// Structured facts about the subject. The résumé text supplements these;
/// the link guidelines keep the model from inventing URLs.
pub const SUBJECT_FACTS: &str = r#"**Aryan's Key Information:**
- Recent Master's graduate in Applied Computer Science from Concordia University (2023-2025)
- Bachelor's in Computer Science from Amity University (2017-2021)
- Currently: Associate I at Amazon Canada FC (Oct 2023 - May 2025)
- Previous: TechOps Engineer at Comviva (June 2021 - Aug 2021)
- Location: Montreal, QC (willing to relocate anywhere in Canada)
- Work Status: PGWP valid until 2028, actively seeking full-time AI/ML engineering roles
- Contact: aryanbvp.09@gmail.com

**Notable Projects:**
1. **Tik AI** - TikTok AI Agent with Google Gemini 2.5 Flash (90%+ accuracy, <2s response) - Live Demo: https://ai-agent-livid-eight.vercel.app/
2. **Scrapy** - TikTok Scraper with AI Vector Search (100ms embedding, <50ms search) - Website: https://scrapy-ai.vercel.app/
3. **Multi-Agent LLM Chatbot** - RLHF system (92% routing accuracy, 87% response relevance) - GitHub repository available
4. **TubeLytics v2** - Real-time YouTube Analytics (60% API call reduction) - GitHub repository available
5. **OpenTracks** - Sport Tracker Android App (Aggregate-Statistics dashboard, voice announcements) - GitHub: https://github.com/HWJFish/OpenTracks-Winter-SOEN-6431_2024

**IMPORTANT - Link Guidelines:**
- ONLY mention links that are explicitly provided above
- Do NOT create or suggest GitHub links, website links, or demo URLs that aren't listed
- For projects without specific links, say "repository available" or "live demo available" but don't provide fake URLs
- Be accurate about which projects have public links vs private repositories
- Do NOT make up website URLs or demo links that don't exist

**Tech Stack Highlights:**
- AI/ML: LangChain, FAISS, TensorFlow, Vertex AI, Gemini API
- Backend: FastAPI, Node.js, Java, Scala, Play Framework
- Frontend: Next.js, React, TypeScript, Tailwind CSS
- Mobile: Android SDK, Java, Material Design, Gradle
- Cloud: AWS (SageMaker, Lambda, S3), Docker, Kubernetes
- Databases: PostgreSQL, Redis, Vector Databases"#;

/// Closing instructions appended after the question.
pub const CLOSING_INSTRUCTIONS: &str = r#"**Instructions:**
1. Analyze the question intent and provide a helpful, engaging response
2. Use the conversation context to build naturally on previous exchanges
3. Include relevant technical details and achievements
4. End with a follow-up suggestion to encourage continued engagement
5. Keep the response conversational but informative

Respond as Aryan's AI assistant:"#;

const RESUME_HEADER: &str = "--- Full Resume Text ---";
const RESUME_FOOTER: &str = "--- End Resume ---";
const HISTORY_HEADER: &str = "**Previous Conversation Context:**";

/// Assembles the completion prompt. Sections are emitted in a fixed order;
/// the résumé section is emitted (empty) even when no document loaded, and
/// the history section is skipped entirely for a fresh session.
pub struct PromptBuilder<'a> {
    persona: &'a str,
    facts: &'a str,
    resume_text: &'a str,
    history: &'a [Exchange],
    question: &'a str,
}

impl<'a> PromptBuilder<'a> {
    pub fn new() -> Self {
        Self {
            persona: PERSONA,
            facts: SUBJECT_FACTS,
            resume_text: "",
            history: &[],
            question: "",
        }
    }

    pub fn resume_text(mut self, resume_text: &'a str) -> Self {
        self.resume_text = resume_text;
        self
    }

    pub fn history(mut self, history: &'a [Exchange]) -> Self {
        self.history = history;
        self
    }

    pub fn question(mut self, question: &'a str) -> Self {
        self.question = question;
        self
    }

    pub fn build(&self) -> String {
        let mut prompt = String::new();

        prompt.push_str(self.persona);
        prompt.push_str("\n\n");
        prompt.push_str(self.facts);

        prompt.push_str("\n\n");
        prompt.push_str(RESUME_HEADER);
        prompt.push('\n');
        prompt.push_str(self.resume_text);
        prompt.push('\n');
        prompt.push_str(RESUME_FOOTER);

        if !self.history.is_empty() {
            prompt.push_str("\n\n");
            prompt.push_str(HISTORY_HEADER);
            prompt.push('\n');
            for exchange in self.history {
                prompt.push_str("User: ");
                prompt.push_str(&exchange.question);
                prompt.push_str("\nAI: ");
                prompt.push_str(&exchange.answer);
                prompt.push_str("\n\n");
            }
        }

        prompt.push_str("\n\n**Current Question:** ");
        prompt.push_str(self.question);
        prompt.push_str("\n\n");
        prompt.push_str(CLOSING_INSTRUCTIONS);

        prompt
    }
}

impl Default for PromptBuilder<'_> {
    fn default() -> Self {
        Self::new()
    }
}

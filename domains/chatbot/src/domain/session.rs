//! Conversation session: the message list sent to the completion service
//!
//! A session is a request-scoped value. It always starts with exactly one
//! system turn carrying the assistant instructions for the current date.

use chrono::{Local, NaiveDate};

use crate::domain::entities::{ChatTurn, TurnRole};

const SYSTEM_PROMPT_TEMPLATE: &str = "\
You are ReWearBot, the friendly assistant of ReWear, a community-powered clothing exchange platform.

Your role is to:
- Help users upload and list clothing
- Suggest relevant clothing swaps
- Explain how point-based redemptions work
- Encourage eco-conscious behavior
- Keep every exchange respectful, inclusive, and transparent

Also:
- Promote sustainability by explaining the environmental impact of reusing clothes
- Help users track their activity: swaps done, points earned, and items listed
- When asked to explain a process, answer with a text-based ASCII flowchart
- Politely decline topics outside clothing exchange and sustainability
- Never store or ask for private information

Current date: {current_date}";

/// Render the system instruction for `date`, e.g. "October 19, 2026"
pub fn system_instruction(date: NaiveDate) -> String {
    SYSTEM_PROMPT_TEMPLATE.replace("{current_date}", &date.format("%B %d, %Y").to_string())
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConversationSession {
    date: NaiveDate,
    history: Vec<ChatTurn>,
}

impl ConversationSession {
    /// Start a session whose instruction is rendered for `date`
    pub fn new(date: NaiveDate) -> Self {
        let mut session = Self {
            date,
            history: Vec::new(),
        };
        session.initialize();
        session
    }

    /// Start a session for the local calendar date
    #[mutants::skip] // Depends on the wall clock; `new` carries the logic
    pub fn today() -> Self {
        Self::new(Local::now().date_naive())
    }

    /// Reset the history to the single system turn
    pub fn initialize(&mut self) {
        self.history = vec![ChatTurn::system(system_instruction(self.date))];
    }

    pub fn history(&self) -> &[ChatTurn] {
        &self.history
    }

    /// Build the messages for one completion request.
    ///
    /// A non-empty `external_history` is replayed verbatim after a fresh
    /// system turn and `user_input` is not appended: stateless callers send
    /// their latest message as part of that history. Otherwise the session
    /// history is followed by `user_input` as a user turn.
    pub fn build_messages(
        &self,
        user_input: &str,
        external_history: Option<&[ChatTurn]>,
    ) -> Vec<ChatTurn> {
        match external_history {
            Some(history) if !history.is_empty() => {
                let mut messages = Vec::with_capacity(history.len() + 1);
                messages.push(ChatTurn::system(system_instruction(self.date)));
                messages.extend_from_slice(history);
                messages
            }
            _ => {
                let mut messages = self.history.clone();
                messages.push(ChatTurn {
                    role: TurnRole::User,
                    content: user_input.to_string(),
                });
                messages
            }
        }
    }
}

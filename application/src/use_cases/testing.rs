//! Scripted text generator shared by the use case tests

use crate::ports::text_generation::{GenerationError, TextGenerator};
use async_trait::async_trait;
use atlas_domain::Message;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub(crate) type Reply = Result<String, GenerationError>;

struct Rule {
    needle: String,
    replies: Vec<Reply>,
    served: AtomicUsize,
}

impl Rule {
    fn new(needle: &str, replies: Vec<Reply>) -> Self {
        Self {
            needle: needle.to_string(),
            replies,
            served: AtomicUsize::new(0),
        }
    }

    fn next_reply(&self) -> Option<Reply> {
        let index = self.served.fetch_add(1, Ordering::SeqCst);
        self.replies
            .get(index)
            .or_else(|| self.replies.last())
            .cloned()
    }
}

/// Answers by the first rule whose needle appears in the prompt.
///
/// A rule holds a sequence of replies handed out in order; its last reply
/// repeats once the sequence is used up.
pub(crate) struct ScriptedGenerator {
    rules: Vec<Rule>,
    fallback: Reply,
    delay: Option<Duration>,
    calls: Mutex<Vec<(String, Option<f32>)>>,
}

impl ScriptedGenerator {
    pub(crate) fn new() -> Self {
        Self {
            rules: Vec::new(),
            fallback: Err(GenerationError::Other("no scripted reply".to_string())),
            delay: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn on(mut self, needle: &str, reply: &str) -> Self {
        self.rules.push(Rule::new(needle, vec![Ok(reply.to_string())]));
        self
    }

    /// Replies handed out one per matching call, in order
    pub(crate) fn on_sequence(mut self, needle: &str, replies: Vec<Reply>) -> Self {
        self.rules.push(Rule::new(needle, replies));
        self
    }

    /// Failures take precedence over replies registered with [`Self::on`]
    pub(crate) fn fail_on(mut self, needle: &str, error: GenerationError) -> Self {
        self.rules.insert(0, Rule::new(needle, vec![Err(error)]));
        self
    }

    pub(crate) fn default_response(mut self, reply: &str) -> Self {
        self.fallback = Ok(reply.to_string());
        self
    }

    pub(crate) fn failing(error: GenerationError) -> Self {
        let mut generator = Self::new();
        generator.fallback = Err(error);
        generator
    }

    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub(crate) fn calls_containing(&self, needle: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(prompt, _)| prompt.contains(needle))
            .count()
    }

    pub(crate) fn temperatures(&self) -> Vec<Option<f32>> {
        self.calls.lock().unwrap().iter().map(|(_, t)| *t).collect()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(
        &self,
        messages: &[Message],
        temperature: Option<f32>,
    ) -> Result<String, GenerationError> {
        let prompt = messages
            .iter()
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        self.calls.lock().unwrap().push((prompt.clone(), temperature));

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.rules
            .iter()
            .find(|rule| prompt.contains(rule.needle.as_str()))
            .and_then(Rule::next_reply)
            .unwrap_or_else(|| self.fallback.clone())
    }
}

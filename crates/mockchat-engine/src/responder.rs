//! Reply generation.

/// Placeholder replaced by the submitted text in a reply template.
pub const INPUT_PLACEHOLDER: &str = "{input}";

/// Default reply template.
pub const DEFAULT_REPLY_TEMPLATE: &str = r#"This is a simulated AI response to "{input}"."#;

/// Produces the assistant text for a submitted message.
pub trait Responder: Send + Sync + 'static {
    fn reply(&self, text: &str) -> String;
}

/// Fills a fixed template with the submitted text.
#[derive(Debug, Clone)]
pub struct SimulatedResponder {
    template: String,
}

impl SimulatedResponder {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }
}

impl Default for SimulatedResponder {
    fn default() -> Self {
        Self::new(DEFAULT_REPLY_TEMPLATE)
    }
}

impl Responder for SimulatedResponder {
    fn reply(&self, text: &str) -> String {
        self.template.replace(INPUT_PLACEHOLDER, text)
    }
}

//! Stage definition: one named delegation to a completion backend.

use crate::core::PriorOutputs;
use std::fmt;

/// Renders a stage's prompt from the outputs of previously completed stages.
pub type PromptTemplate = Box<dyn Fn(&PriorOutputs) -> String + Send + Sync>;

/// One step in a sequential pipeline.
///
/// A stage names the backend it delegates to, optionally carries a system
/// instruction, and renders its prompt from prior stage outputs. Stages are
/// immutable once the pipeline is built.
pub struct Stage {
    name: String,
    backend: String,
    system_instruction: Option<String>,
    template: PromptTemplate,
}

impl Stage {
    /// Creates a stage whose prompt is rendered from prior outputs.
    pub fn new<F>(name: impl Into<String>, backend: impl Into<String>, template: F) -> Self
    where
        F: Fn(&PriorOutputs) -> String + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            backend: backend.into(),
            system_instruction: None,
            template: Box::new(template),
        }
    }

    /// Creates a stage with a fixed prompt that ignores prior outputs.
    ///
    /// Useful for the first stage of a chain.
    pub fn from_prompt(
        name: impl Into<String>,
        backend: impl Into<String>,
        prompt: impl Into<String>,
    ) -> Self {
        let prompt = prompt.into();
        Self::new(name, backend, move |_outputs: &PriorOutputs| prompt.clone())
    }

    /// Sets the system instruction sent alongside every prompt.
    #[must_use]
    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    /// Returns the stage name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the backend identifier this stage delegates to.
    #[must_use]
    pub fn backend(&self) -> &str {
        &self.backend
    }

    /// Returns the system instruction, if any.
    #[must_use]
    pub fn system_instruction(&self) -> Option<&str> {
        self.system_instruction.as_deref()
    }

    /// Renders the prompt for this stage from prior stage outputs.
    #[must_use]
    pub fn render(&self, prior: &PriorOutputs) -> String {
        (self.template)(prior)
    }
}

impl fmt::Debug for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stage")
            .field("name", &self.name)
            .field("backend", &self.backend)
            .field("system_instruction", &self.system_instruction)
            .finish()
    }
}

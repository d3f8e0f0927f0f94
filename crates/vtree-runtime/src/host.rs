#![forbid(unsafe_code)]

//! Host boundary: where rendered markup and container settings go.
//!
//! The widget never touches a DOM or a terminal directly. A [`Host`] owns
//! the container element; the widget hands it whole HTML fragments and
//! layout hints. [`MemoryHost`] captures everything for tests and tooling.

use std::fmt::{Debug, Display};

/// Output surface for a tree widget.
pub trait Host {
    type Error: Debug + Display;

    /// Start delivering interactions for the container.
    fn attach(&mut self) -> Result<(), Self::Error>;

    /// Stop delivering interactions.
    fn detach(&mut self) -> Result<(), Self::Error>;

    /// Cap the container height; content beyond it scrolls.
    fn set_max_height(&mut self, px: u32) -> Result<(), Self::Error>;

    /// Replace the container content with `html`.
    fn commit(&mut self, html: &str) -> Result<(), Self::Error>;

    /// Remove all content.
    fn clear(&mut self) -> Result<(), Self::Error>;
}

/// Errors from [`MemoryHost`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemoryHostError {
    /// Content was committed while not attached.
    Detached,
    /// `attach` was called twice.
    AlreadyAttached,
}

impl Display for MemoryHostError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Detached => write!(f, "host is not attached"),
            Self::AlreadyAttached => write!(f, "host is already attached"),
        }
    }
}

impl std::error::Error for MemoryHostError {}

/// Captured host outputs.
#[derive(Debug, Default, Clone)]
pub struct HostOutputs {
    /// Every committed fragment, oldest first.
    pub commits: Vec<String>,
    /// Last `set_max_height` value.
    pub max_height: Option<u32>,
    /// Number of `clear` calls.
    pub clears: usize,
    pub attaches: usize,
    pub detaches: usize,
}

impl HostOutputs {
    /// Most recent committed fragment.
    #[must_use]
    pub fn last_commit(&self) -> Option<&str> {
        self.commits.last().map(String::as_str)
    }

    /// Number of renders delivered.
    #[must_use]
    pub fn render_count(&self) -> usize {
        self.commits.len()
    }
}

/// In-memory host that records what it receives.
#[derive(Debug, Default, Clone)]
pub struct MemoryHost {
    attached: bool,
    content: String,
    outputs: HostOutputs,
}

impl MemoryHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Current container content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    #[must_use]
    pub fn outputs(&self) -> &HostOutputs {
        &self.outputs
    }

    /// Take captured outputs, leaving empty defaults.
    pub fn take_outputs(&mut self) -> HostOutputs {
        std::mem::take(&mut self.outputs)
    }
}

impl Host for MemoryHost {
    type Error = MemoryHostError;

    fn attach(&mut self) -> Result<(), Self::Error> {
        if self.attached {
            return Err(MemoryHostError::AlreadyAttached);
        }
        self.attached = true;
        self.outputs.attaches += 1;
        Ok(())
    }

    fn detach(&mut self) -> Result<(), Self::Error> {
        self.attached = false;
        self.outputs.detaches += 1;
        Ok(())
    }

    fn set_max_height(&mut self, px: u32) -> Result<(), Self::Error> {
        self.outputs.max_height = Some(px);
        Ok(())
    }

    fn commit(&mut self, html: &str) -> Result<(), Self::Error> {
        if !self.attached {
            return Err(MemoryHostError::Detached);
        }
        html.clone_into(&mut self.content);
        self.outputs.commits.push(html.to_owned());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), Self::Error> {
        self.content.clear();
        self.outputs.clears += 1;
        Ok(())
    }
}

//! Command registration capability
//!
//! The coordinator installs named callables onto a shared browser handle
//! through this trait. The concrete browser binding implements it outside
//! the core; [`InMemoryRegistry`] is the in-process binding used by
//! embedders and tests.

use serde_json::{Map, Value};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use visreg_core::{Result, VisregError};

/// Arguments passed to an installed command.
///
/// One shape covers all four commands: `check` uses name + image + options
/// + dom dump, the baseline/snapshot lookups use the options map as their
/// query parameters.
#[derive(Debug, Clone, Default)]
pub struct CommandArgs {
    pub check_name: Option<String>,
    pub image: Option<Vec<u8>>,
    pub options: Map<String, Value>,
    pub dom_dump: Option<Value>,
}

impl CommandArgs {
    pub fn named(check_name: impl Into<String>) -> Self {
        Self {
            check_name: Some(check_name.into()),
            ..Default::default()
        }
    }

    /// Lookup-style arguments: just query parameters.
    pub fn params(options: Map<String, Value>) -> Self {
        Self {
            options,
            ..Default::default()
        }
    }

    pub fn with_image(mut self, image: impl Into<Vec<u8>>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn with_options(mut self, options: Map<String, Value>) -> Self {
        self.options = options;
        self
    }

    pub fn with_dom_dump(mut self, dom_dump: Value) -> Self {
        self.dom_dump = Some(dom_dump);
        self
    }
}

/// Future returned by a command handler
pub type CommandFuture = Pin<Box<dyn Future<Output = Result<Value>> + Send>>;

/// An installed command: named callable returning a JSON value
pub type CommandHandler = Arc<dyn Fn(CommandArgs) -> CommandFuture + Send + Sync>;

/// Capability to install named callables on the shared browser handle.
///
/// Installing under an existing name replaces the previous handler, which
/// is what isolates one scenario's commands from the next.
pub trait CommandRegistry: Send + Sync {
    fn register(&mut self, name: &str, handler: CommandHandler);
}

/// In-process registry backed by a map.
#[derive(Default)]
pub struct InMemoryRegistry {
    commands: HashMap<String, CommandHandler>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of all installed commands.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.commands.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Invoke an installed command by name.
    pub async fn invoke(&self, name: &str, args: CommandArgs) -> Result<Value> {
        let handler = self
            .commands
            .get(name)
            .ok_or_else(|| VisregError::Other(format!("command not found: {}", name)))?;
        handler(args).await
    }
}

impl CommandRegistry for InMemoryRegistry {
    fn register(&mut self, name: &str, handler: CommandHandler) {
        self.commands.insert(name.to_string(), handler);
    }
}

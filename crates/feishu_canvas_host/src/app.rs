//! Extension registry and node lifecycle driver.
//!
//! The [`App`] plays the part of the editor host: it holds the registered
//! extensions, runs their node-type hooks when a node type is registered,
//! runs their setup once, and creates node instances through the resulting
//! hook chains.
//!
//! # Lifecycle
//!
//! 1. **Registration** - extensions are added with
//!    [`add_extensions()`](App::add_extensions); names must be unique
//! 2. **Node types** - [`register_node_type()`](App::register_node_type) lets
//!    every extension wrap the new type's hooks, in registration order
//! 3. **Setup** - [`setup()`](App::setup) runs each extension's `setup()` once
//! 4. **Nodes** - [`create_node()`](App::create_node) instantiates a node and
//!    runs its construction and size hooks
//!
//! Extensions only see node types registered after they were added, in the
//! same way a late-loaded editor extension misses types that already exist.
//!
//! # Example
//!
//! ```
//! use feishu_canvas_host::app::App;
//! use feishu_canvas_host::node::NodeId;
//! use feishu_canvas_host::node_type::NodeData;
//!
//! let mut app = App::new();
//! app.register_node_type(NodeData::new("FeishuTableNode")).unwrap();
//! app.setup();
//!
//! let node = app.create_node("FeishuTableNode", NodeId::new(1)).unwrap();
//! assert_eq!(node.type_name(), "FeishuTableNode");
//! ```

use std::sync::Arc;

use hashbrown::{HashMap, HashSet};

use crate::extension::{Extension, Extensions};
use crate::hooks::HookError;
use crate::logger::{Logger, TracingLogger};
use crate::node::{NodeId, NodeInstance};
use crate::node_type::{NodeData, NodeType};
use crate::presentation::PresentationHost;

// ─────────────────────────────────────────────────────────────────────────────
// AppError
// ─────────────────────────────────────────────────────────────────────────────

/// Errors raised while registering extensions or driving node lifecycles.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// An extension with this name is already registered.
    #[error("extension '{0}' is already registered")]
    DuplicateExtension(String),

    /// A node type with this name is already registered.
    #[error("node type '{0}' is already registered")]
    DuplicateNodeType(String),

    /// No node type with this name is registered.
    #[error("node type '{0}' is not registered")]
    UnknownNodeType(String),

    /// A lifecycle hook failed.
    #[error(transparent)]
    Hook(#[from] HookError),
}

// ─────────────────────────────────────────────────────────────────────────────
// AppHandle
// ─────────────────────────────────────────────────────────────────────────────

/// Capabilities the host hands to extensions.
///
/// Cheap to clone; hooks capture a clone when they need to log later.
#[derive(Clone)]
pub struct AppHandle {
    logger: Arc<dyn Logger>,
    presentation: Option<Arc<dyn PresentationHost>>,
}

impl AppHandle {
    /// Returns the logger for operator-visible observations.
    #[must_use]
    pub fn logger(&self) -> &Arc<dyn Logger> {
        &self.logger
    }

    /// Returns the presentation host, if the embedding environment has one.
    #[must_use]
    pub fn presentation(&self) -> Option<&Arc<dyn PresentationHost>> {
        self.presentation.as_ref()
    }
}

impl Default for AppHandle {
    fn default() -> Self {
        Self {
            logger: Arc::new(TracingLogger),
            presentation: None,
        }
    }
}

impl core::fmt::Debug for AppHandle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AppHandle")
            .field("has_presentation", &self.presentation.is_some())
            .finish_non_exhaustive()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// App
// ─────────────────────────────────────────────────────────────────────────────

/// A registered node type together with the metadata it was registered with.
struct RegisteredType {
    node_type: NodeType,
    data: NodeData,
}

/// The host-side registry extensions are installed into.
pub struct App {
    /// Capabilities shared with extensions.
    handle: AppHandle,

    /// Extensions in registration order.
    extensions: Vec<Box<dyn Extension>>,

    /// Names seen so far (for duplicate detection).
    extension_names: HashSet<String>,

    /// Registered node types keyed by type name.
    node_types: HashMap<String, RegisteredType>,

    /// Whether [`setup()`](Self::setup) has run.
    set_up: bool,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Creates an app that logs through `tracing` and has no presentation
    /// surface.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handle: AppHandle::default(),
            extensions: Vec::new(),
            extension_names: HashSet::new(),
            node_types: HashMap::new(),
            set_up: false,
        }
    }

    /// Replaces the logger handed to extensions.
    #[must_use]
    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.handle.logger = logger;
        self
    }

    /// Supplies a presentation host.
    #[must_use]
    pub fn with_presentation(mut self, presentation: Arc<dyn PresentationHost>) -> Self {
        self.handle.presentation = Some(presentation);
        self
    }

    /// Returns the capabilities handed to extensions.
    #[must_use]
    pub fn handle(&self) -> &AppHandle {
        &self.handle
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Extension Management
    // ─────────────────────────────────────────────────────────────────────────

    /// Registers one extension or a whole group.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::DuplicateExtension`] if a name is already taken.
    pub fn add_extensions<E: Extensions>(&mut self, extensions: E) -> Result<&mut Self, AppError> {
        extensions.add_to_app(self)?;
        Ok(self)
    }

    /// Registers a boxed extension.
    ///
    /// If [`setup()`](Self::setup) already ran, the extension is set up
    /// immediately.
    pub(crate) fn register_boxed(&mut self, extension: Box<dyn Extension>) -> Result<(), AppError> {
        let name = extension.name().to_owned();
        if !self.extension_names.insert(name.clone()) {
            return Err(AppError::DuplicateExtension(name));
        }

        tracing::debug!(extension = %name, "extension registered");
        if self.set_up {
            extension.setup(&self.handle);
        }
        self.extensions.push(extension);
        Ok(())
    }

    /// Returns the names of registered extensions, in registration order.
    #[must_use]
    pub fn extension_names(&self) -> Vec<&str> {
        self.extensions.iter().map(|extension| extension.name()).collect()
    }

    /// Runs every extension's `setup()` once, in registration order.
    ///
    /// Later calls do nothing.
    pub fn setup(&mut self) {
        if self.set_up {
            return;
        }
        for extension in &self.extensions {
            extension.setup(&self.handle);
        }
        self.set_up = true;
    }

    /// Returns whether [`setup()`](Self::setup) has run.
    #[must_use]
    pub fn is_set_up(&self) -> bool {
        self.set_up
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Node Types
    // ─────────────────────────────────────────────────────────────────────────

    /// Registers a node type, giving every extension a chance to wrap its
    /// hooks first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::DuplicateNodeType`] if the name is already taken.
    pub fn register_node_type(&mut self, data: NodeData) -> Result<&NodeType, AppError> {
        if self.node_types.contains_key(&data.name) {
            return Err(AppError::DuplicateNodeType(data.name));
        }

        let mut node_type = NodeType::new(data.name.clone());
        for extension in &self.extensions {
            extension.before_register_node_type(&mut node_type, &data, &self.handle);
        }
        tracing::debug!(
            node_type = %data.name,
            hooks = node_type.hooks.installed_count(),
            "node type registered"
        );

        let name = data.name.clone();
        let entry = self
            .node_types
            .entry(name)
            .or_insert(RegisteredType { node_type, data });
        Ok(&entry.node_type)
    }

    /// Returns a registered node type.
    #[must_use]
    pub fn node_type(&self, name: &str) -> Option<&NodeType> {
        self.node_types.get(name).map(|entry| &entry.node_type)
    }

    /// Returns the metadata a node type was registered with.
    #[must_use]
    pub fn node_data(&self, name: &str) -> Option<&NodeData> {
        self.node_types.get(name).map(|entry| &entry.data)
    }

    /// Returns the node type an instance was created from.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::UnknownNodeType`] if that type is not registered.
    pub fn node_type_of(&self, node: &NodeInstance) -> Result<&NodeType, AppError> {
        self.node_type(node.type_name())
            .ok_or_else(|| AppError::UnknownNodeType(node.type_name().to_owned()))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Nodes
    // ─────────────────────────────────────────────────────────────────────────

    /// Creates an instance of a registered node type.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::UnknownNodeType`] for an unregistered type, or
    /// [`AppError::Hook`] if the construction or size hook fails.
    pub fn create_node(&self, type_name: &str, id: NodeId) -> Result<NodeInstance, AppError> {
        let entry = self
            .node_types
            .get(type_name)
            .ok_or_else(|| AppError::UnknownNodeType(type_name.to_owned()))?;
        Ok(entry.node_type.instantiate(&entry.data, id)?)
    }
}

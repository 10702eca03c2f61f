//! Extensions: named bundles of node-type behavior.
//!
//! An extension is the unit of registration with the host. It gets two
//! chances to act:
//!
//! 1. **Node type registration** - `before_register_node_type()` runs for
//!    every node type the host registers, in extension registration order.
//!    This is where hook slots get wrapped.
//! 2. **Setup** - `setup()` runs once after the host is ready, in
//!    registration order. This is where presentation work happens.
//!
//! Both are infallible. An extension that cannot do its job on some host
//! (no panel to attach to, wrong node type) quietly does nothing.
//!
//! # Example
//!
//! ```
//! use feishu_canvas_host::app::{App, AppHandle};
//! use feishu_canvas_host::extension::Extension;
//!
//! struct Announce;
//!
//! impl Extension for Announce {
//!     fn name(&self) -> &str {
//!         "example.announce"
//!     }
//!
//!     fn setup(&self, app: &AppHandle) {
//!         app.logger().info(self.name(), "ready");
//!     }
//! }
//!
//! let mut app = App::new();
//! app.add_extensions(Announce).unwrap();
//! app.setup();
//! ```

use crate::app::{App, AppError, AppHandle};
use crate::node_type::{NodeData, NodeType};

// ─────────────────────────────────────────────────────────────────────────────
// Extension Trait
// ─────────────────────────────────────────────────────────────────────────────

/// A named set of behaviors attached to node types.
pub trait Extension: Send + Sync + 'static {
    /// Unique name. Registering two extensions with the same name fails.
    fn name(&self) -> &str;

    /// Called for every node type before the host finishes registering it.
    ///
    /// Implementations check `node_data.name` and wrap the slots they care
    /// about on `node_type.hooks`.
    fn before_register_node_type(
        &self,
        _node_type: &mut NodeType,
        _node_data: &NodeData,
        _app: &AppHandle,
    ) {
    }

    /// Called once when the host finishes starting up.
    fn setup(&self, _app: &AppHandle) {}
}

// ─────────────────────────────────────────────────────────────────────────────
// Extensions Trait (for add_extensions polymorphism)
// ─────────────────────────────────────────────────────────────────────────────

/// Types that can be added to an [`App`] in one call.
///
/// Implemented for every [`Extension`] and for [`ExtensionGroupBuilder`].
pub trait Extensions {
    /// Registers these extensions with the app.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::DuplicateExtension`] on a name clash. Extensions
    /// ahead of the clashing one stay registered.
    fn add_to_app(self, app: &mut App) -> Result<(), AppError>;
}

impl<E: Extension> Extensions for E {
    fn add_to_app(self, app: &mut App) -> Result<(), AppError> {
        app.register_boxed(Box::new(self))
    }
}

impl Extensions for ExtensionGroupBuilder {
    fn add_to_app(self, app: &mut App) -> Result<(), AppError> {
        for extension in self.extensions {
            app.register_boxed(extension)?;
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// ExtensionGroup
// ─────────────────────────────────────────────────────────────────────────────

/// A bundle of extensions registered together.
///
/// # Example
///
/// ```ignore
/// app.add_extensions(
///     FeishuTableExtensions::default()
///         .build()
///         .disable("comfyui.feishu.table.error-handling"),
/// )?;
/// ```
pub trait ExtensionGroup {
    /// Returns the extensions in this group, in registration order.
    fn build(self) -> ExtensionGroupBuilder;
}

/// Builder for customizing an extension group before registering it.
#[derive(Default)]
pub struct ExtensionGroupBuilder {
    extensions: Vec<Box<dyn Extension>>,
}

impl ExtensionGroupBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            extensions: Vec::new(),
        }
    }

    /// Appends an extension.
    #[must_use]
    #[expect(
        clippy::should_implement_trait,
        reason = "This is a builder method, not std::ops::Add"
    )]
    pub fn add<E: Extension>(mut self, extension: E) -> Self {
        self.extensions.push(Box::new(extension));
        self
    }

    /// Removes every extension with the given name.
    #[must_use]
    pub fn disable(mut self, name: &str) -> Self {
        self.extensions.retain(|extension| extension.name() != name);
        self
    }

    /// Returns the names of the contained extensions, in order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.extensions.iter().map(|extension| extension.name()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Named(&'static str);

    impl Extension for Named {
        fn name(&self) -> &str {
            self.0
        }
    }

    #[test]
    fn builder_preserves_order_and_disables_by_name() {
        let builder = ExtensionGroupBuilder::new()
            .add(Named("a"))
            .add(Named("b"))
            .add(Named("c"))
            .disable("b");

        assert_eq!(builder.names(), vec!["a", "c"]);
    }

    #[test]
    fn group_registration_stops_at_duplicate() {
        let mut app = App::new();
        let result = app.add_extensions(
            ExtensionGroupBuilder::new()
                .add(Named("a"))
                .add(Named("a"))
                .add(Named("b")),
        );

        assert!(matches!(result, Err(AppError::DuplicateExtension(name)) if name == "a"));
        assert_eq!(app.extension_names(), vec!["a"]);
    }
}

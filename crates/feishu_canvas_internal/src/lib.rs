//! # Feishu Canvas Internal Library
//!
//! Re-exports the feishu_canvas crates for convenience.

/// Layer 1: Host contract.
pub use feishu_canvas_host;

/// Layer 2: Feishu table node extensions.
pub use feishu_canvas_extensions;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use feishu_canvas_extensions::prelude::*;
    pub use feishu_canvas_host::prelude::*;
}

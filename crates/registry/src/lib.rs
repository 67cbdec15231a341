//! Registry layer - dependency resolution, task selection, and the task registry.

#![warn(missing_docs)]

pub mod selector;
pub mod dependency;
pub mod error;
pub mod registry;
pub mod shared;

pub use selector::{TaskSelector, DefaultSelector};
pub use dependency::{DependencyResolver, Resolution};
pub use error::{RegistryError, Result};
pub use registry::TaskRegistry;
pub use shared::SharedRegistry;

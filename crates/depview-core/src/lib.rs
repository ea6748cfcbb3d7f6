pub mod loader;
pub mod path;
pub mod project;
pub mod project_file;
pub mod resolver;
pub mod session;
pub mod solution;

pub use depview_error::{Error, ErrorKind, Result};
pub use loader::{ProjectDescriptor, SolutionLoader};
pub use project::{Project, ProjectId};
pub use project_file::{ProjectReferenceDecl, read_project_references};
pub use resolver::{DependencyResolver, Resolution, ResolutionWarning};
pub use session::Session;
pub use solution::{FanOut, Solution};

pub mod common;
pub mod placeholder;
pub mod plan;
pub mod project;
pub mod selection;
pub mod template;

pub use crate::domain::DomainError;
pub use placeholder::PlaceholderMap;
pub use plan::InvocationPlan;
pub use selection::SelectionRecord;

pub mod config;
pub mod constants;
pub mod dataset;
pub mod error;
pub mod filter;
pub mod logging;
pub mod metrics;
pub mod questionnaire;
pub mod screens;
pub mod selection;
pub mod taxonomy;
pub mod types;

pub use dataset::Dataset;
pub use error::{FinderError, Result};
pub use filter::{filter_by_keyword, filter_by_keywords, KeywordFilter};
pub use selection::{Action, SelectedKeywords};
pub use taxonomy::{Category, Taxonomy};
pub use types::{OrgField, Organisation};

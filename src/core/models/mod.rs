pub mod audit;
pub mod cache_entry;
pub mod entity;
pub mod method;
pub mod report;

pub use audit::AppLog;
pub use cache_entry::CacheEntry;
pub use entity::Entity;
pub use method::{KeyFields, Kwargs, Method, MethodKind};
pub use report::{EqualSplitExpense, MonthlyReport};

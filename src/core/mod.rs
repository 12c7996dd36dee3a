pub mod relay;
pub mod resolver;

pub use crate::domain::model::{CalendarDay, DateRange, SpendReport};
pub use crate::domain::ports::{ConfigProvider, SpendFetcher};
pub use crate::utils::error::Result;

pub mod menu;
pub mod seeder;

pub use crate::domain::model::{CreatedDocument, MenuItem};
pub use crate::domain::ports::{DocumentStore, Query};
pub use crate::utils::error::Result;

//! Pure data structures: catalog records, content documents and the merged page view model.

pub mod content;
pub mod page;
pub mod product;

pub use content::*;
pub use page::*;
pub use product::*;

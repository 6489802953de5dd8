//! Service layer: business logic between the HTTP surface and the
//! repositories.

mod items;

pub use items::ItemService;

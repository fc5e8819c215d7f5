mod pool;
mod postgres;
mod store;

#[cfg(test)]
pub mod memory;

pub use pool::create_pool;
pub use postgres::PgStore;
pub use store::{DiaryStore, WeatherStore};

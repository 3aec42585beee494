// shopcart/src/adapters/mod.rs

//! In-memory collaborators, enough to run the cart rules in tests and demos.

pub mod memory;

pub use memory::{
  FixedClock, InMemoryCartItems, InMemoryCatalog, InMemoryCustomers, RecordingEventBus, StaticAuthorization,
  SystemClock,
};

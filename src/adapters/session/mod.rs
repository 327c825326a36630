//! Session adapters implementing the SessionStore port.

mod in_memory;

pub use in_memory::InMemorySessionStore;

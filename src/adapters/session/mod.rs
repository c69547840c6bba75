//! Session store adapters.

mod in_memory;
mod purge;

pub use in_memory::InMemorySessionStore;
pub use purge::spawn_idle_purge;

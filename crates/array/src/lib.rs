//! Array lifecycle for the Lattice array store.
//!
//! An [`Array`] binds a URI to an engine session: `create` persists a
//! schema at a URI, `open` binds a live session and fetches the persisted
//! schema, `close` releases the session. The engine calls that block on
//! I/O (create and open) run on the blocking pool so the async scheduler
//! is never stalled; everything else executes inline.

pub mod array;

pub use array::{Array, OpenOptions};

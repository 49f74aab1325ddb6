//! Bus core: the facade tying queue and tables together.
//!
//! The only public API from this module is [`Bus`], which owns the storage,
//! enforces the `Uninitialized → Ready` lifecycle and runs dispatch.
//!
//! Internal modules:
//! - [`bus`]: publish / process / dispatch and table management.

mod bus;

pub use bus::Bus;

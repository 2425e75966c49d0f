//! Platform-independent core of the pointer field effect: pointer tracking,
//! trail particles, the proximity field and the enable/disable lifecycle.
//! Nothing here touches the DOM; the web front-end supplies a
//! [`Scheduler`] and a [`Surface`].

pub mod config;
pub mod constants;
pub mod engine;
pub mod field;
pub mod lifecycle;
pub mod overlay;
pub mod particle;
pub mod pointer;
pub mod trail;

pub use config::*;
pub use engine::*;
pub use field::*;
pub use lifecycle::*;
pub use overlay::*;
pub use particle::*;
pub use pointer::*;
pub use trail::*;

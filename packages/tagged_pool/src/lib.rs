#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! This package provides [`TaggedPool`], an object pool that pre-creates reusable instances of
//! several kinds of items and hands them out by tag.
//!
//! It is meant for objects that are expensive to create and are needed in bursts, such as
//! short-lived visual effects in a game: the after-images left behind by a dashing character,
//! sparks, dust clouds. Instead of creating and destroying such objects on every use, the pool
//! creates them once and flips them between active and inactive.
//!
//! # Features
//!
//! - **Tag-based lookup**: Each kind of item is registered under a tag and requested by it.
//! - **Pre-allocation**: A configurable number of instances is created up front per tag.
//! - **Opt-in growth**: Tags marked expandable get a new instance when all existing ones are in
//!   use. Other tags report exhaustion, which callers treat as a normal outcome.
//! - **Deterministic reuse**: Inactive instances are handed out in the order they were created.
//! - **Host-defined items**: Items implement [`Poolable`] to tell the pool how to create them and
//!   how to react to activation.
//! - **Thread-safe and single-threaded variants**: [`TaggedPool`] for exclusive access,
//!   [`SharedTaggedPool`] for sharing between threads.
//! - **Data-driven configuration**: [`PoolLayout`] describes pool contents in TOML.
//!
//! # Example
//!
//! ```rust
//! use tagged_pool::{ItemSpec, Poolable, TaggedPool};
//!
//! #[derive(Debug)]
//! struct AfterImage {
//!     alpha: f32,
//! }
//!
//! impl Poolable for AfterImage {
//!     fn instantiate(&self) -> Self {
//!         Self { alpha: self.alpha }
//!     }
//!
//!     fn set_active(&mut self, active: bool) {
//!         if active {
//!             self.alpha = 1.0;
//!         }
//!     }
//! }
//!
//! let mut pool = TaggedPool::builder()
//!     .register(ItemSpec::new("after_image", AfterImage { alpha: 0.0 }).amount(2))
//!     .build()
//!     .unwrap();
//!
//! let image = pool.get("after_image").unwrap();
//! assert_eq!(pool.item(image).alpha, 1.0);
//!
//! pool.item_mut(image).alpha = 0.1;
//! pool.return_item(image);
//!
//! // Returned instances are reused and re-activated.
//! let again = pool.get("after_image").unwrap();
//! assert_eq!(again, image);
//! assert_eq!(pool.item(again).alpha, 1.0);
//! ```

mod builder;
mod error;
mod item_spec;
mod key;
mod layout;
mod pool;
mod poolable;
mod shared;
mod tag;

pub use builder::*;
pub use error::*;
pub use item_spec::*;
pub use key::Key;
pub use layout::*;
pub use pool::*;
pub use poolable::*;
pub use shared::*;
pub use tag::*;

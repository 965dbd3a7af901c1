//! Scanning of content trees
//!
//! This module provides the read side of a sync run:
//! - `exclusion`: which paths are eligible for sync at all
//! - `tree`: recursive enumeration of the regular files under a root
//! - `discoverable`: extraction of progress-trackable scenes from a data root

mod discoverable;
mod exclusion;
mod tree;


pub use discoverable::{
    DiscoverableEntity, DiscoverableScanner, DiscoverableSet, ROOT_FIELD, scene_key,
};
pub use exclusion::{ExclusionPolicy, Pattern};
pub use tree::{ContentTree, TreeListing};

//! Concurrency primitives for sift
//!
//! This crate provides:
//! - ShardedMap: an integer-keyed map split into independently locked shards
//! - ShardAccess: scoped guard granting mutable access to one entry
//!
//! Parallel relevance scoring accumulates `document id -> relevance` into a
//! `ShardedMap` so that worker threads only contend when they touch
//! documents living in the same shard.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod sharded;

pub use sharded::{ShardAccess, ShardKey, ShardedMap};

//! Acquisition tree builder, note renderer and guide flattener.
//!
//! Given the scraped game records, this crate works out how every requested
//! item is obtained and turns that into a step-by-step guide:
//!
//! 1. [`builder::TreeBuilder`] builds an [`AcquisitionNode`] tree, one item
//!    expansion at a time, sharing an [`ExpansionTracker`] across the batch.
//! 2. [`render::annotate`] attaches a human-readable note to every group.
//! 3. [`guide::flatten`] lists the actionable nodes, prerequisites first.
//!
//! # Modules
//!
//! - [`builder`] -- Item, recipe, drop, vendor, enemy, boss and event
//!   resolution plus the worklist that drives them.
//! - [`cache`] -- [`InfoCache`] trait with in-memory and JSON-file stores.
//! - [`config`] -- Configuration loading from `craftguide.yaml`.
//! - [`data`] -- [`GameData`], the indexed record set.
//! - [`error`] -- [`GuideError`].
//! - [`guide`] -- Steps, guide entries and [`guide::build_guide`].
//! - [`index`] -- [`RecordIndex`], a sorted case-insensitive lookup table.
//! - [`media`] -- Image and video path conventions.
//! - [`node`] -- Tree node and child-group types.
//! - [`render`] -- Text notes.
//! - [`tracker`] -- Batch-wide record of expanded items.
//!
//! [`InfoCache`]: cache::InfoCache
//! [`GameData`]: data::GameData
//! [`GuideError`]: error::GuideError
//! [`RecordIndex`]: index::RecordIndex
//! [`AcquisitionNode`]: node::AcquisitionNode
//! [`ExpansionTracker`]: tracker::ExpansionTracker

pub mod builder;
pub mod cache;
pub mod config;
pub mod data;
pub mod error;
pub mod guide;
pub mod index;
pub mod media;
pub mod node;
pub mod render;
pub mod tracker;

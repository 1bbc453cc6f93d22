//! # bustle-anim: Animation core for bustle
//!
//! Panels of source text spawn at random spots, grow, scroll for a while,
//! shrink, and vanish, forever. This crate holds everything that decides
//! what each cell of a frame shows:
//!
//! - **[`config`]**: `AnimConfig`, every tunable constant in one place
//! - **[`text`]**: `TextStore`, the loaded source file and its line table
//! - **[`glyph`]**: border and 2×2 ink-pattern glyph tables
//! - **[`panel`]**: the per-panel lifecycle state machine
//! - **[`pool`]**: the fixed-size panel collection
//! - **[`compositor`]**: bounds, z-order, and the per-cell rasterizer
//! - **[`scene`]**: ties it together as a `bustle_term` `Animation`

pub mod compositor;
pub mod config;
pub mod glyph;
pub mod panel;
pub mod pool;
pub mod scene;
pub mod text;

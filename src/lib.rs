//! Framery composites screenshots into device picture frames to produce
//! marketing mockups.
//!
//! The pipeline is small and synchronous:
//!
//! - Pick a [`DeviceProfile`] from the catalog
//! - [`frame::build`] renders a transparent frame template once
//! - Per input: optional whitespace [`trim::auto_trim`], aspect-preserving
//!   [`fit::fit_to_rect`], centered paste via [`compose::composite`], and an
//!   optional story-style overlay
//! - [`pipeline::run`] wraps this into a batch loop over a folder
#![forbid(unsafe_code)]

pub mod catalog;
pub mod compose;
pub mod error;
pub mod fit;
pub mod frame;
pub mod overlay;
pub mod pipeline;
pub(crate) mod raster;
pub(crate) mod text;
pub mod trim;

pub use catalog::{DeviceFamily, DeviceKey, DeviceProfile, NotchKind, Padding};
pub use compose::composite;
pub use error::{FrameryError, FrameryResult};
pub use fit::{FitMode, fit_to_rect};
pub use frame::{FrameTemplate, ScreenRect};
pub use overlay::{OverlaySpec, StorySettings};
pub use pipeline::{ItemStatus, RunOptions, RunSummary};
pub use trim::{TrimOptions, TrimOutcome, auto_trim};

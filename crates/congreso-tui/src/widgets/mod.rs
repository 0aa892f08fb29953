//! Reusable widgets.

pub mod carousel;

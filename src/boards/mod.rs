//! Contains implementations of the `Board` trait.

/// A `Board` implementation for gravity-drop four-in-a-row games of any size.
pub mod connect_four;

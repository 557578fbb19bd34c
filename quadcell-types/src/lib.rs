//! # quadcell-types
//!
//! Plain value types shared by the quadcell index.
//!
//! - **Rectangles**: [`Bounds2D`], an axis-aligned rectangle that may be empty
//!   or inverted, used both for query rectangles and for cell bounds.
//!
//! All types are serializable with Serde and convert to and from the `geo`
//! crate's primitives.
//!
//! ## Examples
//!
//! ```rust
//! use quadcell_types::bounds::Bounds2D;
//!
//! let minsk = Bounds2D::new(27.43, 53.83, 27.70, 53.96);
//! assert!(!minsk.is_empty());
//! assert!(minsk.contains_point(27.5, 53.9));
//! ```

pub mod bounds;

pub use bounds::Bounds2D;

//! Configuration options for NestedText emission.
//!
//! NestedText has a single block layout, so there is little to configure:
//! [`NtOptions`] currently controls the indentation width.
//!
//! ## Examples
//!
//! ```rust
//! use serde_nestedtext::{to_string_with_options, NtOptions};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Data {
//!     items: Vec<String>,
//! }
//!
//! let data = Data { items: vec!["a".to_string()] };
//! let options = NtOptions::new().with_indent(4);
//! let text = to_string_with_options(&data, options).unwrap();
//! assert_eq!(text, "items:\n    - a\n");
//! ```

/// Configuration options for NestedText emission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NtOptions {
    /// Columns per nesting level. A width of 0 selects the default of 2.
    pub indent: usize,
}

impl Default for NtOptions {
    fn default() -> Self {
        NtOptions { indent: 2 }
    }
}

impl NtOptions {
    /// Creates the default options (2-space indentation).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_nestedtext::NtOptions;
    ///
    /// let options = NtOptions::new();
    /// assert_eq!(options.indent, 2);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the indentation width (spaces per nesting level).
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }
}

//! # dataset
//!
//! Identifier-indexed heterogeneous collections.
//!
//! `dataset` stores values of unrelated types in a single [`DataSet`], keyed
//! by an identifier of your choice, and hands them back only when asked for
//! the right type. Collections can be nested inside collections, each level
//! with its own identifier type, to build a tree of keyed values.
//!
//! ## Key Features
//!
//! - **Type-safe**: every read checks a run-time [`TypeTag`] before downcasting
//! - **Unique identifiers**: a colliding insert is rejected, never overwritten
//! - **Nesting**: a `DataSet<String, i32>` can live inside a `DataSet<String, String>`
//! - **No self-nesting**: a collection can't be added to itself, and nested sets are
//!   stored as copies, so nesting always builds a finite tree
//! - **Single-threaded**: members are `Rc`-shared, so the compiler keeps sets on one thread
//!
//! ## Usage Examples
//!
//! ### Basic Usage
//!
//! ```rust
//! use dataset::{DataError, DataSet};
//!
//! fn main() -> Result<(), DataError> {
//!     // A collection whose members are identified by strings
//!     let mut set = DataSet::<String, String>::default();
//!
//!     // Store values of different types
//!     set.insert(42, "IntValue".to_string())?;
//!     set.insert(3.14159, "DoubleValue".to_string())?;
//!     set.insert(vec![1, 2, 3, 4, 5], "IntVector".to_string())?;
//!
//!     // Read them back with the type they were stored as
//!     let number = set.get_value::<i32>(&"IntValue".to_string())?;
//!     let numbers = set.get_as::<Vec<i32>>(&"IntVector".to_string());
//!
//!     assert_eq!(number, 42);
//!     assert_eq!(numbers.map(Vec::len), Some(5));
//!
//!     // Asking for the wrong type is an error, not a reinterpretation
//!     match set.get_value::<String>(&"IntValue".to_string()) {
//!         Ok(value) => println!("Value: {}", value),
//!         Err(DataError::KeyNotFound(key)) => println!("Key ({}) doesn't exist", key),
//!         Err(DataError::TypeMismatch { expected, found }) => {
//!             println!("Wanted {} but found {}", expected, found)
//!         }
//!         Err(e) => println!("Other error: {}", e),
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ### Rejected Inserts
//!
//! The `add*` methods report a rejected insert as `false`; the matching
//! `insert*` methods say why.
//!
//! ```rust
//! use dataset::{DataError, DataSet};
//!
//! let mut set = DataSet::<String, String>::new("settings".to_string());
//!
//! assert!(set.add(42, "IntValue".to_string()));
//! assert!(!set.add(7, "IntValue".to_string()));
//! assert_eq!(set.get_as::<i32>(&"IntValue".to_string()), Some(&42));
//!
//! assert_eq!(set.insert_collection(set.clone()), Err(DataError::SelfReference));
//! assert_eq!(set.len(), 1);
//! ```
//!
//! ### Nesting Collections
//!
//! ```rust
//! use dataset::{DataSet, Identifiable, Member, TypedValue};
//!
//! type Matrix2D = Vec<Vec<f64>>;
//!
//! let mut deepest = DataSet::<i32, String>::new(8746993);
//! deepest.add("This is a couple of levels deep".to_string(), "Note".to_string());
//!
//! let mut middle = DataSet::<String, String>::new("Middle".to_string());
//! middle.add(95863416.46, "AnotherDoubleValue".to_string());
//! middle.add_collection_as(deepest, "AVeryDeepSubset".to_string());
//!
//! let mut root = DataSet::<String, String>::default();
//! let surface: Matrix2D = vec![vec![1.5, 0.9], vec![1.2, 1.25]];
//! root.add(surface, "Surface".to_string());
//! root.add_collection(middle.clone());
//!
//! // Later changes to `middle` don't reach the copy inside `root`
//! middle.add(1, "Late".to_string());
//!
//! let stored = root
//!     .get_collection::<String>(&"Middle".to_string())
//!     .expect("nested collection");
//! assert_eq!(stored.len(), 2);
//! assert_eq!(middle.len(), 3);
//!
//! // A nested collection counts as one member
//! assert_eq!(root.len(), 2);
//! assert_eq!(root.total_len(), 3);
//!
//! for (key, member) in &root {
//!     println!("{} -> {:?} (collection: {})", key, member.type_tag(), member.is_collection());
//!     assert_eq!(key, member.id());
//! }
//! ```

mod data_point;
mod data_set;
mod error;
mod identifiable;
mod member;
mod typed_value;

pub use data_point::DataPoint;
pub use data_set::{DataSet, Iter, NanSentinel};
pub use error::DataError;
pub use identifiable::Identifiable;
pub use member::{Member, SetHandle};
pub use typed_value::{try_get_as, try_get_as_mut, TypeTag, TypedValue};

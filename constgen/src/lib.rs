//! # constgen
//!
//! Generates C# classes of compile-time constants mirroring the names a game
//! project exposes through its editor (tags, layers, build scenes) and its
//! `Resources` folders, so code can say `k.Tags.PLAYER` instead of `"Player"`.
//!
//! ## Architecture
//!
//! - [`host`] - capabilities the generator needs from the project
//! - [`ident`] - raw name to `UPPER_SNAKE_CASE` identifier
//! - [`resources`] - resource folder discovery and collision handling
//! - [`model`] - intermediate representation of a generated class
//! - [`emitter`] - C# rendering
//! - [`layers`] - layer mask helpers mirrored from the generated code
//! - [`generator`] - per-class isolated pipeline and output sink
//! - [`settings`] - namespace, file names and resource rules
//! - [`diagnostics`] / [`error`] - warnings and failures
//!
//! ## Example
//!
//! ```rust
//! use constgen::ident::normalize;
//!
//! assert_eq!(normalize("UI Background").unwrap(), "UI_BACKGROUND");
//! assert_eq!(normalize("myHUD").unwrap(), "MY_HUD");
//! ```

pub mod diagnostics;
pub mod emitter;
pub mod error;
pub mod generator;
pub mod host;
pub mod ident;
pub mod layers;
pub mod model;
pub mod resources;
pub mod settings;

// Re-export main types for convenience
pub use diagnostics::Diagnostic;
pub use error::{GenerateError, GenerateResult, HostError};
pub use generator::{ConstantsGenerator, GenerationReport, OutputSink};
pub use host::{Host, HostResult};
pub use model::{ClassKind, ConstantValue, GeneratedClass, Member};
pub use settings::GeneratorSettings;

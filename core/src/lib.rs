#![deny(missing_docs)]

//! # OAS Reader
//!
//! Reads OpenAPI 2.0 (Swagger), 3.0 and 3.1 documents from YAML or JSON into
//! one version-neutral, OpenAPI 3 shaped document model.
//!
//! ```
//! use oas_reader::OpenApiReader;
//!
//! let text = r##"
//! openapi: 3.0.3
//! info: {title: Petstore, version: "1.0"}
//! paths: {}
//! "##;
//! let result = OpenApiReader::default().read_str(text).unwrap();
//! assert_eq!(result.document.info.title, "Petstore");
//! assert!(result.diagnostic.is_clean());
//! ```

/// Shared error types.
pub mod error;

/// Diagnostic records.
pub mod diagnostics;

/// Reader configuration.
pub mod settings;

/// Borrowed views over the untyped tree.
pub mod node;

/// Per-read parsing state.
pub mod context;

/// Parse-scoped scratch space.
pub mod temp_storage;

/// Fixed and patterned field dispatch.
pub mod dispatch;

/// Loadable element registry.
pub mod element;

/// Version services.
pub mod service;

/// The document model.
pub mod models;

/// Lazy reference resolution.
pub mod resolve;

/// Public entry points.
pub mod reader;

mod v2;
mod v3;
mod v31;

pub use context::ParsingContext;
pub use diagnostics::{Diagnostic, OpenApiError};
pub use element::{Element, ElementKind, Loadable};
pub use error::{ReaderError, ReaderResult};
pub use reader::{sniff_version, FragmentResult, OpenApiReader, ReadResult};
pub use resolve::{DocumentSource, Resolvable, Workspace};
pub use service::{service_for, SpecVersion, VersionService};
pub use settings::{ReaderSettings, ReferenceResolution};
pub use v2::OpenApiV2Service;
pub use v3::OpenApiV3Service;
pub use v31::OpenApiV31Service;

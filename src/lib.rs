// Production-quality lints
#![warn(
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro,
    clippy::print_stdout,
    clippy::print_stderr
)]
// Deny truly dangerous patterns
#![deny(clippy::mem_forget)]
// Allow common patterns in library code
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! # compose-testgen: interaction scenarios and mocks for Compose UI tests
//!
//! Given the syntax tree of a Kotlin source file, finds every `@Composable`
//! function and derives what a UI test for it needs:
//!
//! - **Mock arguments**: representative values for every parameter, crossed
//!   into complete argument lists
//! - **Scenarios**: every combination of actions on the tagged elements the
//!   function renders (clicks, text input, visibility checks)
//! - **Imports**: the model types the mocks construct
//!
//! Each (mock × scenario) pair is one test case. [`testgen::render_test_file`]
//! turns them into a Kotlin test class.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use compose_testgen::{analyze, testgen, Settings, SourceModel};
//!
//! let tree = SourceModel::from_yaml(&model_yaml)?.with_compose_library()?;
//! let settings = Settings::load_or_init(project_dir)?;
//!
//! let tests = analyze(&tree, "app/src/main/java/com/example/Login.kt", &settings)?;
//! for test in &tests {
//!     println!("{}", test.to_report());
//! }
//! let kotlin = testgen::render_test_file(&tests, "com.example")?;
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                                                             │
//! │  SourceTree (SourceModel: YAML / JSON)                      │
//! │       │                                                     │
//! │       ├──► TypeResolver ──► Parameter[]                     │
//! │       │         │                                           │
//! │       │         └──► ValueCatalog ──► assemble_mocks        │
//! │       │                                   │                 │
//! │       │                                   ▼                 │
//! │       │                              MockTuple[] + imports  │
//! │       │                                                     │
//! │       └──► Classifier ──► InteractiveElement[]              │
//! │                 │                                           │
//! │                 └──► InteractionResolver ──► synthesize     │
//! │                                                  │          │
//! │                                                  ▼          │
//! │                                             Scenario[]      │
//! │                                                             │
//! │  combine::expand is the Cartesian product behind both.      │
//! │                                                             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//!
//! Rules live in `test-generator.config` (JSON) at the project root, written
//! with defaults on first use. See [`settings`].

// Source access and configuration
pub mod error;
pub mod settings;
pub mod source;
pub mod util;

// Analysis core
pub mod catalog;
pub mod classify;
pub mod combine;
pub mod interaction;
pub mod mock;
pub mod payload;
pub mod resolve;
pub mod scenario;
pub mod types;

// Session and output
pub mod analyze;
pub mod testgen;

pub use analyze::{analyze, AnalysisDiagnostics, Analyzer, FunctionTest, TestCase};
pub use catalog::{CatalogOutput, NamedValue, Value, ValueCatalog};
pub use classify::{Classification, Classifier, UiVocabulary};
pub use combine::expand;
pub use error::{Error, Result};
pub use interaction::{
    ClickAction, ElementKind, InputAction, InteractionType, InteractiveElement, KeyboardShape,
    Scenario, TestNode,
};
pub use mock::{assemble_mocks, MockSet, MockTuple};
pub use payload::Payloads;
pub use resolve::InteractionResolver;
pub use scenario::synthesize;
pub use settings::{NodeSettings, RuleOverrides, Rules, Settings};
pub use source::{
    Argument, CallExpr, Declaration, Expr, ModifierChain, ParamDecl, SourceFile, SourceModel,
    SourceTree, TypeDecl, TypeDeclKind,
};
pub use types::{CollectionKind, Parameter, PrimitiveKind, TypeDescriptor, TypeResolver};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

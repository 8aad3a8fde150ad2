//! snowgen - Snowplow dbt project generator
//!
//! Reads per-brand JSON configs and writes the two manifests the Snowplow
//! unified dbt package expects for each brand.
//!
//! # Layout
//!
//! ```text
//! config/                      dbt_projects/
//! ├── acme.json       ──►      ├── acme/
//! └── globex.json              │   ├── dbt_project.yml
//!                              │   └── packages.yml
//!                              └── globex/
//!                                  └── ...
//! ```
//!
//! # Example
//!
//! ```ignore
//! use snowgen::batch;
//!
//! let report = batch::run("config".as_ref(), "dbt_projects".as_ref())?;
//! println!("{} brands generated", report.succeeded.len());
//! ```

pub mod batch;
pub mod brand;
pub mod cli;
pub mod config;
pub mod error;
pub mod manifest;
pub mod vars;
pub mod yaml;

pub use batch::{BatchReport, BrandEntry};
pub use brand::BrandConfig;
pub use error::GenerateError;
pub use manifest::{GeneratedProject, PackageManifest, PackageSpec, ProjectManifest, project_name};
pub use vars::DerivedVars;

//! dbt project and package manifest generation
//!
//! Each brand gets a directory holding two files:
//!
//! ```text
//! dbt_projects/
//! └── {brand}/
//!     ├── dbt_project.yml   # name, version, profile, packages, vars
//!     └── packages.yml      # the package dependency list
//! ```
//!
//! Both files are regenerated from scratch on every run. Mapping keys are
//! emitted in sorted order to match what the downstream tooling has always
//! received, and strings dbt's YAML 1.1 loader would re-type are quoted.

use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::brand::BrandConfig;
use crate::error::{GenerateError, Result};
use crate::vars::{self, DerivedVars};
use crate::yaml;

pub const PROJECT_FILE: &str = "dbt_project.yml";
pub const PACKAGES_FILE: &str = "packages.yml";

pub const PROJECT_VERSION: &str = "1.0.0";
pub const CONFIG_VERSION: u32 = 2;
pub const PROFILE: &str = "default";
pub const UNIFIED_PACKAGE: &str = "snowplow/unified";
pub const UNIFIED_PACKAGE_VERSION: &str = "0.1.0";

/// A single dbt package dependency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageSpec {
    pub package: String,
    pub version: String,
}

impl PackageSpec {
    /// The pinned Snowplow unified package every brand depends on
    pub fn unified() -> Self {
        Self {
            package: UNIFIED_PACKAGE.to_string(),
            version: UNIFIED_PACKAGE_VERSION.to_string(),
        }
    }
}

/// Contents of dbt_project.yml
// Field order is alphabetical so serialization matches sorted-key output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectManifest {
    #[serde(rename = "config-version")]
    pub config_version: u32,
    pub name: String,
    pub packages: Vec<PackageSpec>,
    pub profile: String,
    pub vars: DerivedVars,
    pub version: String,
}

impl ProjectManifest {
    pub fn new(name: String, vars: DerivedVars) -> Self {
        Self {
            config_version: CONFIG_VERSION,
            name,
            packages: vec![PackageSpec::unified()],
            profile: PROFILE.to_string(),
            vars,
            version: PROJECT_VERSION.to_string(),
        }
    }
}

/// Contents of packages.yml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageManifest {
    pub packages: Vec<PackageSpec>,
}

impl Default for PackageManifest {
    fn default() -> Self {
        Self {
            packages: vec![PackageSpec::unified()],
        }
    }
}

/// Paths of the files written for one brand
#[derive(Debug, Clone)]
pub struct GeneratedProject {
    pub project_path: PathBuf,
    pub packages_path: PathBuf,
}

/// dbt project name for a brand: lower-cased, each whitespace run becomes one underscore
pub fn project_name(brand_name: &str) -> String {
    let mut name = String::from("snowplow_");
    let mut in_whitespace = false;

    for c in brand_name.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                name.push('_');
            }
            in_whitespace = true;
        } else {
            name.extend(c.to_lowercase());
            in_whitespace = false;
        }
    }

    name
}

/// Generate both manifests for a brand into `output_dir`
///
/// Everything is derived and rendered before the directory is touched, so an
/// invalid config leaves nothing on disk. If the second write fails the first
/// file is removed again.
pub fn generate(config: &BrandConfig, output_dir: impl AsRef<Path>) -> Result<GeneratedProject> {
    generate_inner(config, output_dir.as_ref()).inspect_err(|e| {
        if e.is_output_error() {
            error!("Error generating project structure: {}", e);
        } else {
            debug!("Not generating project structure: {}", e);
        }
    })
}

fn generate_inner(config: &BrandConfig, output_dir: &Path) -> Result<GeneratedProject> {
    let name = project_name(config.brand_name()?);
    let vars = vars::derive(config)?;

    let project = yaml::to_string(&ProjectManifest::new(name, vars))?;
    let packages = yaml::to_string(&PackageManifest::default())?;

    fs::create_dir_all(output_dir).map_err(|source| GenerateError::WriteFailure {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let project_path = output_dir.join(PROJECT_FILE);
    write_file(&project_path, &project)?;
    info!("Generated {} at {}", PROJECT_FILE, project_path.display());

    let packages_path = output_dir.join(PACKAGES_FILE);
    if let Err(e) = write_file(&packages_path, &packages) {
        if let Err(rm) = fs::remove_file(&project_path) {
            warn!("Failed to roll back {}: {}", project_path.display(), rm);
        }
        return Err(e);
    }
    info!("Generated {} at {}", PACKAGES_FILE, packages_path.display());

    Ok(GeneratedProject {
        project_path,
        packages_path,
    })
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|source| GenerateError::WriteFailure {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::{Value, json};
    use tempfile::TempDir;

    fn acme() -> BrandConfig {
        let value = json!({
            "brand_name": "Acme Co",
            "app_ids": ["web1"],
            "historical_data_since": "2023-01-01",
            "web_tracking": "yes",
            "mobile_tracking": "no"
        });
        BrandConfig::from_map("acme.json", value.as_object().unwrap().clone())
    }

    #[test]
    fn test_project_name() {
        assert_eq!(project_name("Acme Co"), "snowplow_acme_co");
        assert_eq!(project_name("Big  Box\tStore"), "snowplow_big_box_store");
        assert_eq!(project_name("solo"), "snowplow_solo");
    }

    #[test]
    fn test_generate_writes_both_files() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("acme");

        let generated = generate(&acme(), &out).unwrap();
        assert!(generated.project_path.exists());
        assert!(generated.packages_path.exists());

        let project: ProjectManifest =
            serde_yaml::from_str(&fs::read_to_string(&generated.project_path).unwrap()).unwrap();
        assert_eq!(project.name, "snowplow_acme_co");
        assert_eq!(project.version, "1.0.0");
        assert_eq!(project.config_version, 2);
        assert_eq!(project.profile, "default");
        assert_eq!(project.packages, vec![PackageSpec::unified()]);
        assert_eq!(project.vars, vars::derive(&acme()).unwrap());
        assert_eq!(project.vars["snowplow__enable_web"], Value::Bool(true));

        let packages: PackageManifest =
            serde_yaml::from_str(&fs::read_to_string(&generated.packages_path).unwrap()).unwrap();
        assert_eq!(packages, PackageManifest::default());
    }

    #[test]
    fn test_generate_sorted_block_yaml() {
        let temp = TempDir::new().unwrap();
        let generated = generate(&acme(), temp.path()).unwrap();
        let text = fs::read_to_string(&generated.project_path).unwrap();

        let keys: Vec<&str> = text
            .lines()
            .filter(|l| !l.starts_with(' ') && !l.starts_with('-'))
            .filter_map(|l| l.split(':').next())
            .collect();
        assert_eq!(keys, ["config-version", "name", "packages", "profile", "vars", "version"]);
        assert!(text.contains("snowplow__enable_mobile: false"));
        assert!(!text.contains('{'));
    }

    #[test]
    fn test_generate_quotes_strings_dbt_would_retype() {
        let fields = json!({
            "brand_name": "Acme Co",
            "app_ids": ["on", "y", "1.0"],
            "historical_data_since": "2023-01-01",
            "web_tracking": "yes",
            "mobile_tracking": "no",
            "user_set_variables": {"x": "yes"}
        });
        let config = BrandConfig::from_map("acme.json", fields.as_object().unwrap().clone());
        let temp = TempDir::new().unwrap();

        let generated = generate(&config, temp.path()).unwrap();
        let text = fs::read_to_string(&generated.project_path).unwrap();
        assert!(text.contains("x: 'yes'\n"), "{text}");
        assert!(text.contains("snowplow__start_date: '2023-01-01'\n"), "{text}");
        assert!(text.contains("- 'on'\n"), "{text}");
        assert!(text.contains("- 'y'\n"), "{text}");
        assert!(text.contains("- '1.0'\n"), "{text}");
        assert!(text.contains("snowplow__enable_web: true\n"), "{text}");
        assert!(text.contains("version: 1.0.0\n"), "{text}");

        let project: ProjectManifest = serde_yaml::from_str(&text).unwrap();
        assert_eq!(project.vars, vars::derive(&config).unwrap());
    }

    #[test]
    fn test_generate_overwrites_existing() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(PACKAGES_FILE), "stale: true\nextra: 1\n").unwrap();

        generate(&acme(), temp.path()).unwrap();
        let text = fs::read_to_string(temp.path().join(PACKAGES_FILE)).unwrap();
        assert!(!text.contains("stale"));
    }

    #[test]
    fn test_generate_invalid_config_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("broken");
        let fields = json!({"brand_name": "Broken"});
        let config = BrandConfig::from_map("broken.json", fields.as_object().unwrap().clone());

        let err = generate(&config, &out).unwrap_err();
        assert!(matches!(err, GenerateError::RequiredFieldMissing { .. }));
        assert!(!out.exists());
    }

    #[test]
    fn test_generate_rolls_back_on_second_write_failure() {
        let temp = TempDir::new().unwrap();
        // A directory where packages.yml should go makes that write fail
        fs::create_dir_all(temp.path().join(PACKAGES_FILE)).unwrap();

        let err = generate(&acme(), temp.path()).unwrap_err();
        assert!(matches!(err, GenerateError::WriteFailure { .. }));
        assert!(!temp.path().join(PROJECT_FILE).exists());
    }

    proptest! {
        #[test]
        fn prop_project_name_collapses_whitespace(
            words in prop::collection::vec("[A-Za-z0-9]{1,6}", 1..5),
            gaps in prop::collection::vec("[ \t]{1,3}", 4),
        ) {
            let mut brand = String::new();
            let mut expected = String::from("snowplow_");
            for (i, word) in words.iter().enumerate() {
                if i > 0 {
                    brand.push_str(&gaps[i - 1]);
                    expected.push('_');
                }
                brand.push_str(word);
                expected.push_str(&word.to_lowercase());
            }
            prop_assert_eq!(project_name(&brand), expected);
        }
    }
}

//! N-way comparison of normalized profiles.
//!
//! A comparison walks the union of keys across every profile, category by
//! category, and classifies each key's per-profile values into a [`DiffType`].

mod classify;
mod display;
mod passes;

use std::collections::{BTreeMap, HashSet};

use anyhow::{bail, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::logging::debug;
use crate::profile::NormalizedProfile;

/// The nine comparison categories, in pass order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    /// Object CRUD permissions
    ObjectPermissions,
    /// Field read/edit permissions
    FieldPermissions,
    /// System permission flags
    SystemPermissions,
    /// Apex class access
    ApexClassAccess,
    /// Visualforce page access
    VisualforcePageAccess,
    /// Lightning page access
    LightningPageAccess,
    /// Record type access
    RecordTypeAccess,
    /// Tab visibility
    TabVisibility,
    /// Application visibility
    AppVisibility,
}

impl Category {
    /// Every category, in pass order.
    pub const ALL: [Category; 9] = [
        Category::ObjectPermissions,
        Category::FieldPermissions,
        Category::SystemPermissions,
        Category::ApexClassAccess,
        Category::VisualforcePageAccess,
        Category::LightningPageAccess,
        Category::RecordTypeAccess,
        Category::TabVisibility,
        Category::AppVisibility,
    ];

    /// The serialized category name
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::ObjectPermissions => "objectPermissions",
            Category::FieldPermissions => "fieldPermissions",
            Category::SystemPermissions => "systemPermissions",
            Category::ApexClassAccess => "apexClassAccess",
            Category::VisualforcePageAccess => "visualforcePageAccess",
            Category::LightningPageAccess => "lightningPageAccess",
            Category::RecordTypeAccess => "recordTypeAccess",
            Category::TabVisibility => "tabVisibility",
            Category::AppVisibility => "appVisibility",
        }
    }

    /// Heading used when printing a comparison.
    pub fn title(&self) -> &'static str {
        match self {
            Category::ObjectPermissions => "Object permissions",
            Category::FieldPermissions => "Field permissions",
            Category::SystemPermissions => "System permissions",
            Category::ApexClassAccess => "Apex class access",
            Category::VisualforcePageAccess => "Visualforce page access",
            Category::LightningPageAccess => "Lightning page access",
            Category::RecordTypeAccess => "Record type access",
            Category::TabVisibility => "Tab visibility",
            Category::AppVisibility => "App visibility",
        }
    }

    /// The first segment of every path in this category.
    fn path_root(&self) -> &'static str {
        match self {
            Category::ObjectPermissions | Category::FieldPermissions => "objects",
            Category::SystemPermissions => "systemPermissions",
            Category::ApexClassAccess => "apexClasses",
            Category::VisualforcePageAccess => "visualforcePages",
            Category::LightningPageAccess => "lightningPages",
            Category::RecordTypeAccess => "recordTypes",
            Category::TabVisibility => "tabVisibilities",
            Category::AppVisibility => "appVisibilities",
        }
    }
}

/// How a key's values relate across the compared profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DiffType {
    /// Every profile holds the same value
    Unchanged,
    /// Granted by a single profile
    Added,
    /// Withheld by a single profile
    Removed,
    /// Any other disagreement
    Changed,
}

/// A single profile's value for a key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DiffValue {
    /// A permission flag
    Bool(bool),
    /// A tab visibility setting
    Text(String),
}

impl std::fmt::Display for DiffValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiffValue::Bool(b) => write!(f, "{b}"),
            DiffValue::Text(t) => write!(f, "{t}"),
        }
    }
}

/// One compared key and every profile's value for it.
///
/// The name fields locate the key inside its category:
///
/// | category                | object_name | field_name | permission_name   |
/// |-------------------------|-------------|------------|-------------------|
/// | objectPermissions       | object      | -          | permission        |
/// | fieldPermissions        | object      | field      | permission        |
/// | systemPermissions       | -           | -          | flag              |
/// | apex/vf/lightning/rt    | -           | -          | member name       |
/// | tabVisibility           | -           | -          | tab name          |
/// | appVisibility           | app name    | -          | visible / default |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffItem {
    /// Dot-separated locator of the key
    pub path: String,
    /// Which comparison category the key belongs to
    pub category: Category,
    /// Object, or application for app visibility
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_name: Option<String>,
    /// Field, for field permissions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_name: Option<String>,
    /// Permission, list member or tab name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permission_name: Option<String>,
    /// Profile id to value, in the order profiles were compared
    pub values: IndexMap<String, DiffValue>,
    /// How the values relate
    pub diff_type: DiffType,
}

impl DiffItem {
    /// Rebuild the path of an item from its category and name fields.
    pub fn locator(&self) -> String {
        let mut segments = vec![self.category.path_root()];
        match self.category {
            Category::ObjectPermissions => {
                segments.extend(self.object_name.as_deref());
                segments.push("permissions");
                segments.extend(self.permission_name.as_deref());
            }
            Category::FieldPermissions => {
                segments.extend(self.object_name.as_deref());
                segments.push("fields");
                segments.extend(self.field_name.as_deref());
                segments.extend(self.permission_name.as_deref());
            }
            Category::AppVisibility => {
                segments.extend(self.object_name.as_deref());
                segments.extend(self.permission_name.as_deref());
            }
            _ => {
                segments.extend(self.permission_name.as_deref());
            }
        }
        segments.join(".")
    }
}

/// A compared profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRef {
    /// Profile identifier
    pub id: String,
    /// Profile display name
    pub name: String,
}

/// The result of comparing two or more profiles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    /// The compared profiles, in input order
    pub profiles: Vec<ProfileRef>,
    /// When the comparison was made
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    /// Number of items that aren't unchanged
    pub total_differences: usize,
    /// Items grouped by category in pass order, keys ascending within each
    pub differences: Vec<DiffItem>,
    /// Non-unchanged item count for every category
    pub summary: BTreeMap<Category, usize>,
}

impl ComparisonResult {
    /// Items of a single category, in order.
    pub fn items_in(&self, category: Category) -> impl Iterator<Item = &DiffItem> {
        self.differences
            .iter()
            .filter(move |item| item.category == category)
    }

    /// Whether the profiles differ at all
    pub fn has_differences(&self) -> bool {
        self.total_differences > 0
    }
}

/// Comparison switches.
#[derive(Debug, Default, Clone, Copy)]
pub struct CompareOptions {
    /// Also emit keys whose values are identical across profiles. These
    /// never count towards the totals.
    pub include_unchanged: bool,
}

/// Compare normalized profiles against each other.
///
/// Fails when fewer than two profiles are given or when a profile id appears
/// twice.
pub fn compare(profiles: &[NormalizedProfile], options: CompareOptions) -> Result<ComparisonResult> {
    if profiles.len() < 2 {
        bail!(
            "at least two profiles are needed for a comparison; got {}",
            profiles.len()
        );
    }
    let mut seen = HashSet::new();
    for profile in profiles {
        if !seen.insert(profile.profile_id.as_str()) {
            bail!("profile {} appears more than once", profile.profile_id);
        }
    }

    let differences = passes::run_all(profiles, options.include_unchanged);

    let mut summary: BTreeMap<Category, usize> =
        Category::ALL.iter().map(|c| (*c, 0)).collect();
    let mut total_differences = 0;
    for item in differences
        .iter()
        .filter(|i| i.diff_type != DiffType::Unchanged)
    {
        *summary.entry(item.category).or_default() += 1;
        total_differences += 1;
    }
    debug!(
        "compared {} profiles: {} differences",
        profiles.len(),
        total_differences
    );

    Ok(ComparisonResult {
        profiles: profiles
            .iter()
            .map(|p| ProfileRef {
                id: p.profile_id.to_owned(),
                name: p.profile_name.to_owned(),
            })
            .collect(),
        timestamp: OffsetDateTime::now_utc(),
        total_differences,
        differences,
        summary,
    })
}

//! The category passes of a comparison.

use std::collections::BTreeSet;

use indexmap::IndexMap;

use crate::profile::{FieldPermission, NormalizedProfile, ObjectPermission};

use super::classify::{classify_bools, classify_strings, TwoWaySplit};
use super::{Category, DiffItem, DiffType, DiffValue};

/// Name fields of an item, before its path is built.
#[derive(Default)]
struct Key<'a> {
    object: Option<&'a str>,
    field: Option<&'a str>,
    permission: Option<&'a str>,
}

struct Collector<'p> {
    profiles: &'p [NormalizedProfile],
    include_unchanged: bool,
    items: Vec<DiffItem>,
}

impl<'p> Collector<'p> {
    fn push(
        &mut self,
        category: Category,
        key: Key<'_>,
        values: IndexMap<String, DiffValue>,
        diff_type: DiffType,
    ) {
        if diff_type == DiffType::Unchanged && !self.include_unchanged {
            return;
        }
        let mut item = DiffItem {
            path: String::new(),
            category,
            object_name: key.object.map(str::to_owned),
            field_name: key.field.map(str::to_owned),
            permission_name: key.permission.map(str::to_owned),
            values,
            diff_type,
        };
        item.path = item.locator();
        self.items.push(item);
    }

    fn push_bool<F>(
        &mut self,
        category: Category,
        key: Key<'_>,
        split: TwoWaySplit,
        value_of: F,
    ) where
        F: Fn(&NormalizedProfile) -> bool,
    {
        let values: Vec<bool> = self.profiles.iter().map(&value_of).collect();
        let diff_type = classify_bools(values.iter().copied(), split);
        let values = self
            .profiles
            .iter()
            .zip(values)
            .map(|(p, v)| (p.profile_id.to_owned(), DiffValue::Bool(v)))
            .collect();
        self.push(category, key, values, diff_type);
    }

    fn push_text<F>(&mut self, category: Category, key: Key<'_>, value_of: F)
    where
        F: Fn(&NormalizedProfile) -> &str,
    {
        let diff_type = classify_strings(self.profiles.iter().map(&value_of));
        let values = self
            .profiles
            .iter()
            .map(|p| (p.profile_id.to_owned(), DiffValue::Text(value_of(p).to_owned())))
            .collect();
        self.push(category, key, values, diff_type);
    }
}

/// Run every pass in category order.
pub(super) fn run_all(profiles: &[NormalizedProfile], include_unchanged: bool) -> Vec<DiffItem> {
    let mut collector = Collector {
        profiles,
        include_unchanged,
        items: vec![],
    };

    object_permissions(&mut collector);
    field_permissions(&mut collector);
    system_permissions(&mut collector);
    membership(&mut collector, Category::ApexClassAccess, |p| &p.apex_classes);
    membership(&mut collector, Category::VisualforcePageAccess, |p| {
        &p.visualforce_pages
    });
    membership(&mut collector, Category::LightningPageAccess, |p| {
        &p.lightning_pages
    });
    membership(&mut collector, Category::RecordTypeAccess, |p| &p.record_types);
    tab_visibility(&mut collector);
    app_visibility(&mut collector);

    collector.items
}

fn object_permissions(c: &mut Collector<'_>) {
    let profiles = c.profiles;
    let objects: BTreeSet<&str> = profiles
        .iter()
        .flat_map(|p| p.objects.keys().map(String::as_str))
        .collect();

    for object in objects {
        for permission in ObjectPermission::ALL {
            c.push_bool(
                Category::ObjectPermissions,
                Key {
                    object: Some(object),
                    permission: Some(permission.as_str()),
                    ..Default::default()
                },
                TwoWaySplit::Removed,
                |p| {
                    p.objects
                        .get(object)
                        .map(|o| o.permissions.get(permission))
                        .unwrap_or(false)
                },
            );
        }
    }
}

fn field_permissions(c: &mut Collector<'_>) {
    let profiles = c.profiles;
    let fields: BTreeSet<(&str, &str)> = profiles
        .iter()
        .flat_map(|p| {
            p.objects.iter().flat_map(|(object, access)| {
                access
                    .fields
                    .keys()
                    .map(move |field| (object.as_str(), field.as_str()))
            })
        })
        .collect();

    for (object, field) in fields {
        for permission in FieldPermission::ALL {
            c.push_bool(
                Category::FieldPermissions,
                Key {
                    object: Some(object),
                    field: Some(field),
                    permission: Some(permission.as_str()),
                },
                TwoWaySplit::Removed,
                |p| {
                    p.objects
                        .get(object)
                        .and_then(|o| o.fields.get(field))
                        .map(|f| f.get(permission))
                        .unwrap_or(false)
                },
            );
        }
    }
}

fn system_permissions(c: &mut Collector<'_>) {
    let profiles = c.profiles;
    let flags: BTreeSet<&str> = profiles
        .iter()
        .flat_map(|p| p.system_permissions.keys().map(String::as_str))
        .collect();

    for flag in flags {
        c.push_bool(
            Category::SystemPermissions,
            Key {
                permission: Some(flag),
                ..Default::default()
            },
            TwoWaySplit::Removed,
            |p| p.system_permissions.get(flag).copied().unwrap_or(false),
        );
    }
}

/// Presence of a name in one of the profile's name sets.
fn membership<F>(c: &mut Collector<'_>, category: Category, set_of: F)
where
    F: Fn(&NormalizedProfile) -> &BTreeSet<String>,
{
    let profiles = c.profiles;
    let members: BTreeSet<&str> = profiles
        .iter()
        .flat_map(|p| set_of(p).iter().map(String::as_str))
        .collect();

    for member in members {
        c.push_bool(
            category,
            Key {
                permission: Some(member),
                ..Default::default()
            },
            TwoWaySplit::Added,
            |p| set_of(p).contains(member),
        );
    }
}

fn tab_visibility(c: &mut Collector<'_>) {
    let profiles = c.profiles;
    let tabs: BTreeSet<&str> = profiles
        .iter()
        .flat_map(|p| p.tab_visibilities.keys().map(String::as_str))
        .collect();

    for tab in tabs {
        c.push_text(
            Category::TabVisibility,
            Key {
                permission: Some(tab),
                ..Default::default()
            },
            |p| p.tab_state(tab),
        );
    }
}

fn app_visibility(c: &mut Collector<'_>) {
    let profiles = c.profiles;
    let apps: BTreeSet<&str> = profiles
        .iter()
        .flat_map(|p| p.app_visibilities.keys().map(String::as_str))
        .collect();

    for app in apps {
        c.push_bool(
            Category::AppVisibility,
            Key {
                object: Some(app),
                permission: Some("visible"),
                ..Default::default()
            },
            TwoWaySplit::Added,
            |p| p.app_visibilities.get(app).map(|a| a.visible).unwrap_or(false),
        );
        c.push_bool(
            Category::AppVisibility,
            Key {
                object: Some(app),
                permission: Some("default"),
                ..Default::default()
            },
            TwoWaySplit::Added,
            |p| {
                p.app_visibilities
                    .get(app)
                    .map(|a| a.is_default)
                    .unwrap_or(false)
            },
        );
    }
}

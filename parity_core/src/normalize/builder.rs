//! Conversion of a profile bundle into a [`NormalizedProfile`].

use crate::connectors::FieldGrant;
use crate::profile::{
    AppVisibility, FieldPermissions, NormalizedProfile, ObjectAccess, ObjectPermissions,
    TAB_VISIBLE,
};

use super::aggregate::ProfileBundle;

/// Build the canonical document for one profile.
pub fn build_profile(bundle: ProfileBundle) -> NormalizedProfile {
    let mut profile = NormalizedProfile {
        profile_id: bundle.profile_id,
        profile_name: bundle.profile_name,
        system_permissions: bundle.flags,
        ..Default::default()
    };

    // Last write wins. The source shouldn't report duplicates per
    // container/object anyway.
    for grant in bundle.object_grants {
        let entry = profile.objects.entry(grant.object_name).or_default();
        entry.permissions = ObjectPermissions {
            read: grant.read,
            create: grant.create,
            edit: grant.edit,
            delete: grant.delete,
            view_all: grant.view_all,
            modify_all: grant.modify_all,
        };
    }

    for grant in bundle.field_grants {
        let (object_name, field_name) = split_field(&grant);
        let entry: &mut ObjectAccess = profile.objects.entry(object_name).or_default();
        entry.fields.insert(
            field_name,
            FieldPermissions {
                read: grant.read,
                edit: grant.edit,
            },
        );
    }

    profile.apex_classes.extend(bundle.apex_classes);
    profile.visualforce_pages.extend(bundle.visualforce_pages);
    profile.lightning_pages.extend(bundle.lightning_pages);
    profile.record_types.extend(bundle.record_types);

    profile.tab_visibilities.extend(
        bundle
            .tabs
            .into_iter()
            .map(|tab| (tab, TAB_VISIBLE.to_owned())),
    );
    // There's no source signal for the default app yet
    profile.app_visibilities.extend(bundle.apps.into_iter().map(|app| {
        (
            app,
            AppVisibility {
                visible: true,
                is_default: false,
            },
        )
    }));

    profile
}

/// Split a field grant into (object, field). The source reports fields as
/// `Object.Field`; a bare field name falls back to the grant's object.
fn split_field(grant: &FieldGrant) -> (String, String) {
    match grant.field_name.split_once('.') {
        Some((object, field)) if !object.is_empty() && !field.is_empty() => {
            (object.to_owned(), field.to_owned())
        }
        _ => (grant.object_name.to_owned(), grant.field_name.to_owned()),
    }
}

#[cfg(test)]
mod tests {
    use maplit::btreemap;

    use super::*;
    use crate::connectors::ObjectGrant;
    use crate::profile::TAB_HIDDEN;

    fn field(object: &str, field: &str, read: bool, edit: bool) -> FieldGrant {
        FieldGrant {
            container_id: "C1".to_owned(),
            object_name: object.to_owned(),
            field_name: field.to_owned(),
            read,
            edit,
        }
    }

    #[test]
    fn field_without_object_grant_synthesizes_default_object() {
        let bundle = ProfileBundle {
            profile_id: "P1".to_owned(),
            field_grants: vec![field("Invoice__c", "Invoice__c.Amount__c", true, false)],
            ..Default::default()
        };

        let profile = build_profile(bundle);

        let invoice = &profile.objects["Invoice__c"];
        assert_eq!(invoice.permissions, ObjectPermissions::default());
        assert_eq!(
            invoice.fields,
            btreemap! {"Amount__c".to_owned() => FieldPermissions { read: true, edit: false }}
        );
    }

    #[test]
    fn later_object_grant_overwrites_earlier() {
        let bundle = ProfileBundle {
            object_grants: vec![
                ObjectGrant {
                    object_name: "Account".to_owned(),
                    read: true,
                    ..Default::default()
                },
                ObjectGrant {
                    object_name: "Account".to_owned(),
                    read: true,
                    delete: true,
                    ..Default::default()
                },
            ],
            field_grants: vec![field("Account", "Account.Name", true, true)],
            ..Default::default()
        };

        let profile = build_profile(bundle);

        assert_eq!(profile.objects.len(), 1);
        assert!(profile.objects["Account"].permissions.delete);
        assert!(profile.objects["Account"].fields["Name"].edit);
    }

    #[test]
    fn bare_field_name_uses_grant_object() {
        let bundle = ProfileBundle {
            field_grants: vec![field("Contact", "Email", true, false)],
            ..Default::default()
        };

        let profile = build_profile(bundle);

        assert!(profile.objects["Contact"].fields["Email"].read);
    }

    #[test]
    fn collections_are_sorted_and_deduplicated() {
        let bundle = ProfileBundle {
            apex_classes: vec!["Zeta".to_owned(), "Alpha".to_owned(), "Zeta".to_owned()],
            visualforce_pages: vec!["b".to_owned(), "a".to_owned()],
            record_types: vec!["Case.Support".to_owned(), "Account.Business".to_owned()],
            ..Default::default()
        };

        let profile = build_profile(bundle);

        let classes: Vec<_> = profile.apex_classes.iter().cloned().collect();
        assert_eq!(classes, vec!["Alpha".to_owned(), "Zeta".to_owned()]);
        let pages: Vec<_> = profile.visualforce_pages.iter().cloned().collect();
        assert_eq!(pages, vec!["a".to_owned(), "b".to_owned()]);
        let types: Vec<_> = profile.record_types.iter().cloned().collect();
        assert_eq!(
            types,
            vec!["Account.Business".to_owned(), "Case.Support".to_owned()]
        );
    }

    #[test]
    fn tabs_and_apps_become_visibility_maps() {
        let bundle = ProfileBundle {
            flags: btreemap! {"ViewSetup".to_owned() => false},
            tabs: vec!["Invoices".to_owned()],
            apps: vec!["Sales".to_owned()],
            ..Default::default()
        };

        let profile = build_profile(bundle);

        assert_eq!(profile.tab_visibilities["Invoices"], TAB_VISIBLE);
        assert_eq!(profile.tab_state("Reports"), TAB_HIDDEN);
        assert_eq!(
            profile.app_visibilities["Sales"],
            AppVisibility {
                visible: true,
                is_default: false
            }
        );
        assert!(!profile.user_permissions()["ViewSetup"]);
    }
}

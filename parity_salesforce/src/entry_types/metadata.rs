use parity_core::connectors::NamedEntity;
use serde::Deserialize;

/// An (Id, Name) row, for ApexClass and ApexPage.
#[derive(Clone, Default, Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct NameRow {
    pub id: String,
    pub name: String,
}

impl From<NameRow> for NamedEntity {
    fn from(val: NameRow) -> Self {
        NamedEntity::new(val.id, val.name)
    }
}

/// An (Id, DeveloperName) row, for FlexiPage and CustomTab.
#[derive(Clone, Default, Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct DeveloperNameRow {
    pub id: String,
    pub developer_name: String,
}

impl From<DeveloperNameRow> for NamedEntity {
    fn from(val: DeveloperNameRow) -> Self {
        NamedEntity::new(val.id, val.developer_name)
    }
}

/// Salesforce RecordType entry.
#[derive(Clone, Default, Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct RecordTypeRow {
    pub id: String,
    pub developer_name: String,
    pub sobject_type: String,
}

impl From<RecordTypeRow> for NamedEntity {
    /// Record types are only unique per object, so the name is qualified.
    fn from(val: RecordTypeRow) -> Self {
        NamedEntity::new(
            val.id,
            format!("{}.{}", val.sobject_type, val.developer_name),
        )
    }
}

/// An AppMenuItem of type TabSet, one per application.
#[derive(Clone, Default, Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct AppMenuItemRow {
    pub application_id: String,
    pub name: String,
}

impl From<AppMenuItemRow> for NamedEntity {
    fn from(val: AppMenuItemRow) -> Self {
        NamedEntity::new(val.application_id, val.name)
    }
}

//! Typed views of the JSON:API documents returned by the Data Management API.
//! Only the fields the tree needs are modelled; everything else is ignored.

use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Collection<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Single<T> {
    pub data: T,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Links {
    #[serde(rename = "self")]
    pub self_link: Link,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Link {
    pub href: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Extension {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub data: Option<ExtensionData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionData {
    pub source_file_name: Option<String>,
}

/// Hubs and projects share a shape.
#[derive(Debug, Clone, Deserialize)]
pub struct Container {
    pub attributes: ContainerAttributes,
    pub links: Links,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContainerAttributes {
    pub name: String,
    #[serde(default)]
    pub extension: Option<Extension>,
}

impl Container {
    pub fn extension_type(&self) -> Option<&str> {
        self.attributes
            .extension
            .as_ref()
            .and_then(|ext| ext.kind.as_deref())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectDetail {
    pub id: String,
    pub relationships: ProjectRelationships,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRelationships {
    pub root_folder: RootFolder,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RootFolder {
    pub meta: RootFolderMeta,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RootFolderMeta {
    pub link: Link,
}

impl ProjectDetail {
    pub fn root_folder_href(&self) -> &str {
        &self.relationships.root_folder.meta.link.href
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FolderEntry {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub attributes: FolderEntryAttributes,
    pub links: Links,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderEntryAttributes {
    pub display_name: Option<String>,
    #[serde(default)]
    pub extension: Option<Extension>,
}

impl FolderEntry {
    pub fn extension_type(&self) -> Option<&str> {
        self.attributes
            .extension
            .as_ref()
            .and_then(|ext| ext.kind.as_deref())
    }

    pub fn source_file_name(&self) -> Option<&str> {
        self.attributes
            .extension
            .as_ref()
            .and_then(|ext| ext.data.as_ref())
            .and_then(|data| data.source_file_name.as_deref())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Version {
    pub id: String,
    pub attributes: VersionAttributes,
    #[serde(default)]
    pub relationships: Option<VersionRelationships>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionAttributes {
    pub last_modified_time: DateTime<Utc>,
    pub last_modified_user_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VersionRelationships {
    #[serde(default)]
    pub derivatives: Option<Derivatives>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Derivatives {
    #[serde(default)]
    pub data: Option<ResourceRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResourceRef {
    pub id: String,
}

impl Version {
    pub fn derivative_id(&self) -> Option<&str> {
        self.relationships
            .as_ref()
            .and_then(|rel| rel.derivatives.as_ref())
            .and_then(|derivatives| derivatives.data.as_ref())
            .map(|data| data.id.as_str())
            .filter(|id| !id.is_empty())
    }
}

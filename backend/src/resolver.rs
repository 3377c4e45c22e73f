use std::sync::Arc;

use tracing::{debug, info};

use crate::{
    error::AppError,
    locator::Locator,
    models::{
        forge::{Container, FolderEntry, Version},
        tree::TreeNode,
    },
    upstream::DataManagementApi,
};

/// Id given to versions that have no viewable derivative yet.
pub const DERIVATIVE_NOT_AVAILABLE: &str = "not_available";

const VERSION_CATEGORY: &str = "versions";
const VERSION_TIME_FORMAT: &str = "%d/%m/%y %H:%M:%S";
const LISTED_EXTENSION_MARKERS: [&str; 3] = ["File", "Folder", "C4RModel"];

/// Turns one tree-expansion request into the children of that node.
#[derive(Clone)]
pub struct TreeResolver {
    api: Arc<dyn DataManagementApi>,
}

impl TreeResolver {
    pub fn new(api: Arc<dyn DataManagementApi>) -> Self {
        Self { api }
    }

    pub async fn resolve(&self, node_id: Option<&str>, token: &str) -> Result<Vec<TreeNode>, AppError> {
        let locator = Locator::parse(node_id);
        debug!(tier = locator.tier(), node_id = ?node_id, "resolving tree node");

        match locator {
            Locator::Root => self.list_hubs(token).await,
            Locator::Hub { hub_id } => self.list_projects(token, &hub_id).await,
            Locator::Project { hub_id, project_id } => {
                self.list_project_root_contents(token, &hub_id, &project_id)
                    .await
            }
            Locator::Folder {
                project_id,
                folder_id,
            } => self.list_folder_contents(token, &project_id, &folder_id).await,
            Locator::Item {
                project_id,
                item_id,
            } => self.list_item_versions(token, &project_id, &item_id).await,
            Locator::Unknown => {
                debug!(node_id = ?node_id, "no children for unrecognized locator");
                Ok(Vec::new())
            }
        }
    }

    async fn list_hubs(&self, token: &str) -> Result<Vec<TreeNode>, AppError> {
        let hubs = self.api.list_hubs(token).await?;
        info!(count = hubs.len(), "listed hubs");
        Ok(hubs.into_iter().map(hub_node).collect())
    }

    async fn list_projects(&self, token: &str, hub_id: &str) -> Result<Vec<TreeNode>, AppError> {
        let projects = self.api.list_projects(token, hub_id).await?;
        info!(hub_id, count = projects.len(), "listed projects");
        Ok(projects.into_iter().map(project_node).collect())
    }

    async fn list_project_root_contents(
        &self,
        token: &str,
        hub_id: &str,
        project_id: &str,
    ) -> Result<Vec<TreeNode>, AppError> {
        let project = self.api.get_project(token, hub_id, project_id).await?;
        let root_href = project.root_folder_href();

        match Locator::parse(Some(root_href)) {
            Locator::Folder {
                project_id,
                folder_id,
            } => self.list_folder_contents(token, &project_id, &folder_id).await,
            _ => Err(AppError::Malformed(format!(
                "root folder link of project {} is not a folder: {root_href}",
                project.id
            ))),
        }
    }

    async fn list_folder_contents(
        &self,
        token: &str,
        project_id: &str,
        folder_id: &str,
    ) -> Result<Vec<TreeNode>, AppError> {
        let entries = self
            .api
            .list_folder_contents(token, project_id, folder_id)
            .await?;
        let total = entries.len();
        let nodes: Vec<TreeNode> = entries.into_iter().filter_map(folder_entry_node).collect();
        info!(project_id, folder_id, total, listed = nodes.len(), "listed folder contents");
        Ok(nodes)
    }

    async fn list_item_versions(
        &self,
        token: &str,
        project_id: &str,
        item_id: &str,
    ) -> Result<Vec<TreeNode>, AppError> {
        let versions = self
            .api
            .list_item_versions(token, project_id, item_id)
            .await?;
        info!(project_id, item_id, count = versions.len(), "listed item versions");
        Ok(versions.iter().map(version_node).collect())
    }
}

fn hub_node(hub: Container) -> TreeNode {
    let category = match hub.extension_type() {
        Some("hubs:autodesk.a360:PersonalHub") => "personalHub",
        Some("hubs:autodesk.bim360:Account") => "bim360Hubs",
        _ => "hubs",
    };
    TreeNode::branch(hub.links.self_link.href, hub.attributes.name, category)
}

fn project_node(project: Container) -> TreeNode {
    let category = match project.extension_type() {
        Some("projects:autodesk.core:Project") => "a360projects",
        Some("projects:autodesk.bim360:Project") => "bim360projects",
        _ => "projects",
    };
    TreeNode::branch(
        project.links.self_link.href,
        project.attributes.name,
        category,
    )
}

/// Deleted markers and unsupported types are dropped.
fn folder_entry_node(entry: FolderEntry) -> Option<TreeNode> {
    let extension_type = entry.extension_type()?;
    if !LISTED_EXTENSION_MARKERS
        .iter()
        .any(|marker| extension_type.contains(marker))
    {
        return None;
    }

    let label = non_blank(entry.attributes.display_name.as_deref())
        .or_else(|| non_blank(entry.source_file_name()))
        .unwrap_or(entry.id.as_str())
        .to_string();

    Some(TreeNode::branch(entry.links.self_link.href, label, entry.kind))
}

fn version_node(version: &Version) -> TreeNode {
    let id = version
        .derivative_id()
        .unwrap_or(DERIVATIVE_NOT_AVAILABLE);
    TreeNode::leaf(id, version_label(version), VERSION_CATEGORY)
}

fn version_label(version: &Version) -> String {
    let number = version
        .id
        .split('=')
        .nth(1)
        .unwrap_or(version.id.as_str());
    let modified = version
        .attributes
        .last_modified_time
        .format(VERSION_TIME_FORMAT);
    let user = version
        .attributes
        .last_modified_user_name
        .as_deref()
        .unwrap_or_default();
    format!("v{number}: {modified} by {user}")
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.trim().is_empty())
}

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::{
    error::AppError,
    models::forge::{Collection, Container, FolderEntry, ProjectDetail, Single, Version},
};

/// The five reads the tree needs from the Data Management API.
#[async_trait]
pub trait DataManagementApi: Send + Sync {
    async fn list_hubs(&self, token: &str) -> Result<Vec<Container>, AppError>;

    async fn list_projects(&self, token: &str, hub_id: &str) -> Result<Vec<Container>, AppError>;

    async fn get_project(
        &self,
        token: &str,
        hub_id: &str,
        project_id: &str,
    ) -> Result<ProjectDetail, AppError>;

    async fn list_folder_contents(
        &self,
        token: &str,
        project_id: &str,
        folder_id: &str,
    ) -> Result<Vec<FolderEntry>, AppError>;

    async fn list_item_versions(
        &self,
        token: &str,
        project_id: &str,
        item_id: &str,
    ) -> Result<Vec<Version>, AppError>;
}

#[derive(Debug, Clone)]
pub struct ForgeClient {
    http: Client,
    base_url: String,
}

impl ForgeClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, AppError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, segments: &[&str]) -> String {
        let mut url = self.base_url.clone();
        for segment in segments {
            url.push('/');
            url.push_str(&urlencoding::encode(segment));
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, token: &str, url: String) -> Result<T, AppError> {
        debug!(%url, "calling data management api");
        let response = self.http.get(&url).bearer_auth(token).send().await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "data management api rejected request");
            return Err(AppError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl DataManagementApi for ForgeClient {
    async fn list_hubs(&self, token: &str) -> Result<Vec<Container>, AppError> {
        let url = self.url(&["project", "v1", "hubs"]);
        let hubs: Collection<Container> = self.get_json(token, url).await?;
        Ok(hubs.data)
    }

    async fn list_projects(&self, token: &str, hub_id: &str) -> Result<Vec<Container>, AppError> {
        let url = self.url(&["project", "v1", "hubs", hub_id, "projects"]);
        let projects: Collection<Container> = self.get_json(token, url).await?;
        Ok(projects.data)
    }

    async fn get_project(
        &self,
        token: &str,
        hub_id: &str,
        project_id: &str,
    ) -> Result<ProjectDetail, AppError> {
        let url = self.url(&["project", "v1", "hubs", hub_id, "projects", project_id]);
        let project: Single<ProjectDetail> = self.get_json(token, url).await?;
        Ok(project.data)
    }

    async fn list_folder_contents(
        &self,
        token: &str,
        project_id: &str,
        folder_id: &str,
    ) -> Result<Vec<FolderEntry>, AppError> {
        let url = self.url(&["data", "v1", "projects", project_id, "folders", folder_id, "contents"]);
        let contents: Collection<FolderEntry> = self.get_json(token, url).await?;
        Ok(contents.data)
    }

    async fn list_item_versions(
        &self,
        token: &str,
        project_id: &str,
        item_id: &str,
    ) -> Result<Vec<Version>, AppError> {
        let url = self.url(&["data", "v1", "projects", project_id, "items", item_id, "versions"]);
        let versions: Collection<Version> = self.get_json(token, url).await?;
        Ok(versions.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn client(server: &Server) -> ForgeClient {
        ForgeClient::new(&server.url(), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn list_hubs_sends_bearer_token() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/project/v1/hubs")
            .match_header("authorization", "Bearer tok-1")
            .with_status(200)
            .with_header("content-type", "application/vnd.api+json")
            .with_body(
                json!({
                    "jsonapi": { "version": "1.0" },
                    "data": [{
                        "type": "hubs",
                        "id": "b.abc",
                        "attributes": {
                            "name": "Acme",
                            "extension": { "type": "hubs:autodesk.bim360:Account" }
                        },
                        "links": { "self": { "href": "https://x/project/v1/hubs/b.abc" } }
                    }]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let hubs = client(&server).list_hubs("tok-1").await.unwrap();
        mock.assert_async().await;
        assert_eq!(hubs.len(), 1);
        assert_eq!(hubs[0].attributes.name, "Acme");
        assert_eq!(hubs[0].extension_type(), Some("hubs:autodesk.bim360:Account"));
    }

    #[tokio::test]
    async fn urn_segments_are_percent_encoded() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock(
                "GET",
                "/data/v1/projects/b.p1/items/urn%3Aadsk.wipprod%3Adm.lineage%3Ai1/versions",
            )
            .with_status(200)
            .with_body(json!({ "data": [] }).to_string())
            .create_async()
            .await;

        let versions = client(&server)
            .list_item_versions("tok", "b.p1", "urn:adsk.wipprod:dm.lineage:i1")
            .await
            .unwrap();
        mock.assert_async().await;
        assert!(versions.is_empty());
    }

    #[tokio::test]
    async fn non_success_status_becomes_upstream_status() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", Matcher::Regex("^/project/v1/hubs/.*/projects$".into()))
            .with_status(403)
            .with_body(r#"{"errors":[{"detail":"forbidden"}]}"#)
            .create_async()
            .await;

        let err = client(&server)
            .list_projects("tok", "b.abc")
            .await
            .unwrap_err();
        match err {
            AppError::UpstreamStatus { status, body } => {
                assert_eq!(status, 403);
                assert!(body.contains("forbidden"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_body_is_decode_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/project/v1/hubs/b.abc/projects/b.p1")
            .with_status(200)
            .with_body(r#"{"data":{"id":"b.p1"}}"#)
            .create_async()
            .await;

        let err = client(&server)
            .get_project("tok", "b.abc", "b.p1")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Decode(_)));
    }
}

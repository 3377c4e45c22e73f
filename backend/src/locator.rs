/// Id the tree widget sends when it wants the top level.
pub const ROOT_SENTINEL: &str = "#";

/// Structured form of a node id. The wire id stays the upstream self-link;
/// only the trailing path segments are significant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    Root,
    Hub { hub_id: String },
    Project { hub_id: String, project_id: String },
    Folder { project_id: String, folder_id: String },
    Item { project_id: String, item_id: String },
    Unknown,
}

impl Locator {
    pub fn parse(raw: Option<&str>) -> Self {
        let raw = raw.map(str::trim).unwrap_or_default();
        if raw.is_empty() || raw == ROOT_SENTINEL {
            return Locator::Root;
        }

        let path = raw.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.trim_end_matches('/').split('/').collect();
        let len = segments.len();
        if len < 2 {
            return Locator::Unknown;
        }

        let id = decode_segment(segments[len - 1]);
        if id.is_empty() {
            return Locator::Unknown;
        }
        let parent = if len >= 3 {
            Some(decode_segment(segments[len - 3])).filter(|value| !value.is_empty())
        } else {
            None
        };

        match (segments[len - 2], parent) {
            ("hubs", _) => Locator::Hub { hub_id: id },
            ("projects", Some(hub_id)) => Locator::Project {
                hub_id,
                project_id: id,
            },
            ("folders", Some(project_id)) => Locator::Folder {
                project_id,
                folder_id: id,
            },
            ("items", Some(project_id)) => Locator::Item {
                project_id,
                item_id: id,
            },
            _ => Locator::Unknown,
        }
    }

    pub fn tier(&self) -> &'static str {
        match self {
            Locator::Root => "root",
            Locator::Hub { .. } => "hubs",
            Locator::Project { .. } => "projects",
            Locator::Folder { .. } => "folders",
            Locator::Item { .. } => "items",
            Locator::Unknown => "unknown",
        }
    }
}

fn decode_segment(segment: &str) -> String {
    urlencoding::decode(segment)
        .map(|value| value.into_owned())
        .unwrap_or_else(|_| segment.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://developer.api.autodesk.com";

    #[test]
    fn absent_or_sentinel_is_root() {
        assert_eq!(Locator::parse(None), Locator::Root);
        assert_eq!(Locator::parse(Some("#")), Locator::Root);
        assert_eq!(Locator::parse(Some("  ")), Locator::Root);
    }

    #[test]
    fn hub_href_names_the_hub() {
        let href = format!("{BASE}/project/v1/hubs/b.abc");
        assert_eq!(
            Locator::parse(Some(&href)),
            Locator::Hub {
                hub_id: "b.abc".into()
            }
        );
        assert_eq!(
            Locator::parse(Some("hubs/abc")),
            Locator::Hub {
                hub_id: "abc".into()
            }
        );
    }

    #[test]
    fn project_href_carries_hub_and_project() {
        let href = format!("{BASE}/project/v1/hubs/b.abc/projects/b.p1/");
        assert_eq!(
            Locator::parse(Some(&href)),
            Locator::Project {
                hub_id: "b.abc".into(),
                project_id: "b.p1".into()
            }
        );
    }

    #[test]
    fn folder_and_item_hrefs_decode_urns() {
        let folder = format!("{BASE}/data/v1/projects/b.p1/folders/urn%3Aadsk.wipprod%3Afs.folder%3Aco.f1");
        assert_eq!(
            Locator::parse(Some(&folder)),
            Locator::Folder {
                project_id: "b.p1".into(),
                folder_id: "urn:adsk.wipprod:fs.folder:co.f1".into()
            }
        );

        let item = format!("{BASE}/data/v1/projects/b.p1/items/urn:adsk.wipprod:dm.lineage:i1?x=1");
        assert_eq!(
            Locator::parse(Some(&item)),
            Locator::Item {
                project_id: "b.p1".into(),
                item_id: "urn:adsk.wipprod:dm.lineage:i1".into()
            }
        );
    }

    #[test]
    fn unrecognized_shapes_are_unknown() {
        assert_eq!(Locator::parse(Some("versions")), Locator::Unknown);
        assert_eq!(Locator::parse(Some("a/versions/v1")), Locator::Unknown);
        assert_eq!(Locator::parse(Some("folders/f1")), Locator::Unknown);
        assert_eq!(Locator::parse(Some("not_available")), Locator::Unknown);
    }
}

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    pub id: String,
    pub label: String,
    pub category: String,
    pub expandable: bool,
}

impl TreeNode {
    pub fn branch(id: impl Into<String>, label: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            category: category.into(),
            expandable: true,
        }
    }

    pub fn leaf(id: impl Into<String>, label: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            category: category.into(),
            expandable: false,
        }
    }
}

/// Wire shape the jsTree widget reads directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsTreeNode {
    pub id: String,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub children: bool,
}

impl From<TreeNode> for JsTreeNode {
    fn from(node: TreeNode) -> Self {
        Self {
            id: node.id,
            text: node.label,
            kind: node.category,
            children: node.expandable,
        }
    }
}

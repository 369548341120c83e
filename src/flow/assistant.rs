//! Assistant ("My AI") records shown by assistant nodes.

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeFile {
    pub file_name: String,
    pub file_id: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ChildAssistant {
    pub id: String,
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DataLakeVectorStore {
    pub id: String,
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GptVersion {
    pub id: String,
    pub name: String,
}

/// A user-defined assistant as delivered by the assistant catalog.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AssistantProfile {
    pub id: String,
    #[serde(default)]
    pub profile_image: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub instructions: String,
    #[serde(default)]
    pub conversation_starters: Option<Vec<String>>,
    #[serde(default)]
    pub knowledge: Option<Vec<KnowledgeFile>>,
    #[serde(default)]
    pub capabilities: Option<Vec<String>>,
    #[serde(default)]
    pub created_date: String,
    #[serde(default)]
    pub updated_date: Option<String>,
    #[serde(default, rename = "AIType")]
    pub ai_type: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub child_assistants: Option<Vec<ChildAssistant>>,
    #[serde(default)]
    pub gpt_version: Option<String>,
    #[serde(default)]
    pub gpt_versions: Option<Vec<GptVersion>>,
    #[serde(default)]
    pub data_lake_vector_stores: Option<Vec<DataLakeVectorStore>>,
    #[serde(default)]
    pub is_sidebar: bool,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub is_pinned: bool,
    #[serde(default)]
    pub is_public: bool,
}

/// List response of the assistant catalog.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct AssistantListResponse {
    pub total_count: u64,
    pub rows: Vec<AssistantProfile>,
}

impl AssistantProfile {
    /// Type label shown on the node, `"N/A"` when unset.
    pub fn type_label(&self) -> &str {
        self.ai_type.as_deref().unwrap_or("N/A")
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_profile_from_catalog_json() {
        let value = json!({
            "id": "ai-1",
            "profileImage": null,
            "name": "정산 도우미",
            "description": "expense helper",
            "instructions": "",
            "conversationStarters": ["hi"],
            "knowledge": [{ "fileName": "rules.pdf", "fileId": "f-1" }],
            "capabilities": null,
            "createdDate": "2025-01-01",
            "updatedDate": null,
            "AIType": "GPT",
            "category": null,
            "categoryId": null,
            "childAssistants": null,
            "gptVersion": "4o",
            "gptVersions": null,
            "dataLakeVectorStores": null,
            "isSidebar": true,
            "isFavorite": false,
            "isPinned": false,
            "isPublic": true
        });
        let profile: AssistantProfile = serde_json::from_value(value).unwrap();
        assert_eq!(profile.type_label(), "GPT");
        assert_eq!(profile.knowledge.unwrap()[0].file_name, "rules.pdf");
        assert!(profile.is_public);
    }

    #[test]
    fn test_profile_type_label_fallback() {
        let profile = AssistantProfile::default();
        assert_eq!(profile.type_label(), "N/A");
    }
}

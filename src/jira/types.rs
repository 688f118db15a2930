//! Jira 검색 응답 wire 타입
//!
//! `fields`는 요청한 필드 이름으로 키잉된 불투명 맵으로 둔다.
//! 두 단계가 서로 다른 필드 조합을 요청하므로 고정 구조체 대신
//! 접근자 메서드로 필요한 값만 꺼낸다.

use serde::Deserialize;
use serde_json::Value;

/// `/rest/api/2/search` 응답 본문
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub issues: Vec<IssueRecord>,
}

/// 검색 결과의 개별 이슈
#[derive(Debug, Clone, Deserialize)]
pub struct IssueRecord {
    pub key: String,
    #[serde(default)]
    pub fields: serde_json::Map<String, Value>,
}

impl IssueRecord {
    /// 단순 문자열 필드 (없거나 null이면 None)
    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }

    /// `status.name`
    pub fn status_name(&self) -> Option<&str> {
        self.fields.get("status")?.get("name")?.as_str()
    }

    /// `parent.key` (서브태스크의 부모 참조)
    pub fn parent_key(&self) -> Option<&str> {
        self.fields.get("parent")?.get("key")?.as_str()
    }

    /// `fixVersions[].name`
    pub fn fix_version_names(&self) -> Vec<String> {
        self.fields
            .get("fixVersions")
            .and_then(Value::as_array)
            .map(|versions| {
                versions
                    .iter()
                    .filter_map(|v| v.get("name").and_then(Value::as_str))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}

//! WorkBoard Data Models
//!
//! TypeScript 렌더러 타입과 매핑되는 Rust 데이터 모델

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 이니셔티브 아래의 서브태스크 카드
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubtaskCard {
    pub key: String,
    pub summary: String,
    pub status: String,
    pub due_date: Option<String>,
    pub parent_key: String,
}

/// 칸반 컬럼에 들어가는 이니셔티브(부모 이슈) 카드
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitiativeCard {
    pub key: String,
    pub summary: String,
    pub status: String,
    pub fix_versions: Vec<String>,
    pub target_end_date: Option<String>,
}

/// "My Work" 집계 결과 스냅샷
///
/// - `columns`: 상태 이름 → Rank 순 이니셔티브 목록
/// - `ordered_initiative_keys`: 컬럼과 무관한 전역 Rank 순서 (2단계 응답 순서 그대로)
/// - `subtasks_by_parent`: 이니셔티브 키 → Rank 순 서브태스크 목록
///
/// 호출마다 새로 만들어 통째로 교체한다. 증분 업데이트는 없다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KanbanModel {
    pub columns: HashMap<String, Vec<InitiativeCard>>,
    pub ordered_initiative_keys: Vec<String>,
    pub subtasks_by_parent: HashMap<String, Vec<SubtaskCard>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kanban_model_serializes_with_camel_case_keys() {
        let mut model = KanbanModel::default();
        model.columns.insert(
            "In Progress".to_string(),
            vec![InitiativeCard {
                key: "DCW-1".to_string(),
                summary: "Initiative".to_string(),
                status: "In Progress".to_string(),
                fix_versions: vec!["R24".to_string()],
                target_end_date: Some("2026-03-01".to_string()),
            }],
        );
        model.ordered_initiative_keys.push("DCW-1".to_string());
        model.subtasks_by_parent.insert(
            "DCW-1".to_string(),
            vec![SubtaskCard {
                key: "DCW-2".to_string(),
                summary: "Subtask".to_string(),
                status: "To Do".to_string(),
                due_date: None,
                parent_key: "DCW-1".to_string(),
            }],
        );

        let value = serde_json::to_value(&model).unwrap();
        assert!(value.get("orderedInitiativeKeys").is_some());
        assert!(value.get("subtasksByParent").is_some());

        let card = &value["columns"]["In Progress"][0];
        assert_eq!(card["fixVersions"][0], "R24");
        assert_eq!(card["targetEndDate"], "2026-03-01");

        let sub = &value["subtasksByParent"]["DCW-1"][0];
        assert_eq!(sub["parentKey"], "DCW-1");
        assert!(sub["dueDate"].is_null());
    }

    #[test]
    fn empty_model_has_empty_collections() {
        let model = KanbanModel::default();
        assert!(model.columns.is_empty());
        assert!(model.ordered_initiative_keys.is_empty());
        assert!(model.subtasks_by_parent.is_empty());
    }
}

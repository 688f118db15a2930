//! Jira REST 연동 모듈
//!
//! - `client`: `/rest/api/2/search` 호출 (Bearer PAT 인증)
//! - `aggregator`: 2단계 의존 fetch로 "My Work" 칸반 모델 생성
//! - `types`: 검색 응답 wire 타입

pub mod aggregator;
pub mod client;
pub mod types;

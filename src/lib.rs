//! WorkBoard - Tauri Backend Library
//!
//! Jira "My Work" 칸반 데스크톱 앱의 Rust 백엔드.
//! PAT 보관(vault), JQL 검색, 칸반 모델 집계를 담당합니다.
//! 설정(URL/프로젝트/이슈타입/사용자 목록)은 렌더러의 로컬 스토어가 관리합니다.

pub mod commands;
pub mod error;
pub mod jira;
pub mod models;
pub mod vault;

use tauri::Manager;

/// Tauri 앱 실행
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .plugin(tauri_plugin_shell::init())
        .setup(|app| {
            // vault가 app_data_dir/credential.vault를 쓰도록 경로 전달
            let app_data_dir = app.handle().path().app_data_dir()?;
            vault::VAULT.set_app_data_dir(app_data_dir);

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::credential::get_credential,
            commands::credential::save_credential,
            commands::credential::clear_credential,
            commands::my_work::fetch_my_work,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}

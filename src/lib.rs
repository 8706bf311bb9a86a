mod cache;
mod constants;
mod error;
mod image_utils;
mod thumbnail;
mod types;

use std::sync::Mutex;

use cache::ThumbnailMemoryCache;
use constants::MEMORY_CACHE_MAX_SIZE;
use thumbnail::generate_project_thumbnails;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    if let Err(e) = tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_fs::init())
        .manage(Mutex::new(ThumbnailMemoryCache::new(MEMORY_CACHE_MAX_SIZE)))
        .invoke_handler(tauri::generate_handler![generate_project_thumbnails])
        .run(tauri::generate_context!())
    {
        eprintln!("Tauriアプリケーション起動エラー: {}", e);
        std::process::exit(1);
    }
}

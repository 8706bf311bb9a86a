mod loader;

pub use loader::generate_all;

use std::path::PathBuf;
use std::sync::Mutex;

use serde::Serialize;
use tauri::{Emitter, Manager};

use crate::cache::ThumbnailMemoryCache;
use crate::constants::CHUNK_CHANNEL_CAPACITY;
use crate::types::{PageThumbnail, ProjectConfig};

/// サムネイル更新単位
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThumbnailChunk {
    /// ページ一覧内の位置（実行中は安定）
    pub index: usize,
    /// サムネイル付きの新しいページエントリ（この位置と置き換える）
    pub page: PageThumbnail,
}

/// サムネイル更新イベント名（ペイロードはVec<ThumbnailChunk>、index昇順）
pub const THUMBNAIL_CHUNK_EVENT: &str = "thumbnail-chunks";

// プロジェクトの全ページのサムネイルを背景で生成し、
// 出来上がった分からまとめてイベントで配信する。
// フロントエンドは受け取ったチャンクを順にページ一覧へ適用する。
#[tauri::command]
pub async fn generate_project_thumbnails(
    app_handle: tauri::AppHandle,
    config: ProjectConfig,
    pages: Vec<PageThumbnail>,
) -> Result<usize, String> {
    let (tx, mut rx) = tokio::sync::mpsc::channel::<ThumbnailChunk>(CHUNK_CHANNEL_CAPACITY);

    let worker_app = app_handle.clone();
    let worker = tokio::task::spawn_blocking(move || {
        let project_dir = PathBuf::from(&config.directory);
        let memory_cache = worker_app.state::<Mutex<ThumbnailMemoryCache>>();
        generate_all(&project_dir, &pages, memory_cache.inner(), &tx)
    });

    // 溜まっている分を1イベントにまとめて送る（FIFOなのでindex昇順は保たれる）
    let mut published = 0usize;
    while let Some(first) = rx.recv().await {
        let mut batch = vec![first];
        while let Ok(chunk) = rx.try_recv() {
            batch.push(chunk);
        }
        published += batch.len();
        app_handle
            .emit(THUMBNAIL_CHUNK_EVENT, &batch)
            .map_err(|e| format!("サムネイル更新イベント送信エラー: {}", e))?;
    }

    match worker.await {
        Ok(Ok(_)) => Ok(published),
        Ok(Err(e)) => Err(e.to_string()),
        Err(e) => Err(format!("サムネイル生成タスクが異常終了しました: {}", e)),
    }
}

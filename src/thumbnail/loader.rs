use std::fs;
use std::path::Path;
use std::sync::Mutex;

use image::GenericImageView;
use tokio::sync::mpsc::Sender;

use super::ThumbnailChunk;
use crate::cache::{ThumbnailMemoryCache, ThumbnailStore};
use crate::constants::THUMBNAIL_HEIGHT;
use crate::error::ThumbnailError;
use crate::image_utils::{
    encode_png, png_data_url, subsample, subsample_factor, validate_dimensions,
};
use crate::types::PageThumbnail;

// ページ一覧を先頭から順に処理し、各ページのサムネイルを
// ディスクキャッシュと照合・生成して (index, 更新済みページ) を送信する。
//
// 一覧は実行中不変のスナップショットであり、indexはそのまま送信先の
// 置換位置になる。途中でエラーが出た場合は残りを処理せず打ち切る
// （送信済みの更新はそのまま有効）。
pub fn generate_all(
    project_dir: &Path,
    pages: &[PageThumbnail],
    memory_cache: &Mutex<ThumbnailMemoryCache>,
    tx: &Sender<ThumbnailChunk>,
) -> Result<usize, ThumbnailError> {
    let store = ThumbnailStore::open(project_dir)?;

    for (index, page) in pages.iter().enumerate() {
        let data_url = load_or_generate(&store, page, memory_cache)?;
        let chunk = ThumbnailChunk {
            index,
            page: page.with_thumbnail(data_url),
        };
        tx.blocking_send(chunk)
            .map_err(|_| ThumbnailError::ChannelClosed)?;
    }

    Ok(pages.len())
}

// 1ページ分の解決: メモリキャッシュ → ディスクキャッシュ → 生成
fn load_or_generate(
    store: &ThumbnailStore,
    page: &PageThumbnail,
    memory_cache: &Mutex<ThumbnailMemoryCache>,
) -> Result<String, ThumbnailError> {
    let source = Path::new(&page.path);
    let cache_path = store.path_for(source)?;

    let key =
        ThumbnailMemoryCache::cache_key(&page.path, source_mtime_millis(source)?, THUMBNAIL_HEIGHT);
    if let Some(hit) = lock_cache(memory_cache).get(&key) {
        // ディスク側も揃っている場合のみ採用（責務は「ディスクとメモリの両方に存在」）
        if cache_path.exists() {
            return Ok(hit);
        }
    }

    let png = if store.is_fresh(source, &cache_path)? {
        // 既存キャッシュをそのまま採用（画像として読めなければ実行全体が失敗）
        let bytes = fs::read(&cache_path).map_err(|e| ThumbnailError::Io {
            path: cache_path.clone(),
            source: e,
        })?;
        image::load_from_memory(&bytes).map_err(|e| ThumbnailError::CorruptCache {
            path: cache_path.clone(),
            source: e,
        })?;
        bytes
    } else {
        let thumb = generate_thumbnail(source)?;
        let png = encode_png(&thumb)?;
        fs::write(&cache_path, &png).map_err(|e| ThumbnailError::Io {
            path: cache_path.clone(),
            source: e,
        })?;
        png
    };

    let data_url = png_data_url(&png);
    lock_cache(memory_cache).insert(key, data_url.clone());
    Ok(data_url)
}

// ソース画像を間引きデコードしてサムネイルを得る
// 出力は目標サイズ（高さTHUMBNAIL_HEIGHT）の近似で、補間はかけない
fn generate_thumbnail(source: &Path) -> Result<image::DynamicImage, ThumbnailError> {
    let img = image::open(source).map_err(|e| ThumbnailError::UnreadableSource {
        path: source.to_path_buf(),
        source: e,
    })?;

    let (width, height) = img.dimensions();
    validate_dimensions(width, height)?;

    Ok(subsample(img, subsample_factor(width, height)))
}

// メモリキャッシュキー用のソース更新時刻（ミリ秒）
fn source_mtime_millis(source: &Path) -> Result<u64, ThumbnailError> {
    let metadata = fs::metadata(source).map_err(|e| ThumbnailError::Io {
        path: source.to_path_buf(),
        source: e,
    })?;
    Ok(metadata
        .modified()
        .map(|t| {
            t.duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_millis() as u64
        })
        .unwrap_or(0))
}

// ポイズンされていても中のキャッシュをそのまま使う
fn lock_cache(
    memory_cache: &Mutex<ThumbnailMemoryCache>,
) -> std::sync::MutexGuard<'_, ThumbnailMemoryCache> {
    match memory_cache.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

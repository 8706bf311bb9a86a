use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::constants::{PROJECT_DATA_DIR, THUMBS_SUBDIR};
use crate::error::ThumbnailError;

// プロジェクト直下のサムネイルキャッシュ（<プロジェクト>/.tess/thumbs）
// キャッシュファイル名はソースのファイル名そのまま。
// 別ディレクトリの同名ソースは区別されない。
pub struct ThumbnailStore {
    dir: PathBuf,
}

impl ThumbnailStore {
    // キャッシュディレクトリを（無ければ再帰的に）作成して開く
    // 既存ディレクトリはエラーにしない
    pub fn open(project_dir: &Path) -> Result<Self, ThumbnailError> {
        let dir = project_dir.join(PROJECT_DATA_DIR).join(THUMBS_SUBDIR);
        fs::create_dir_all(&dir).map_err(|e| ThumbnailError::CreateCacheDir {
            path: dir.clone(),
            source: e,
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    // ソースのファイル名をキーとするキャッシュパス
    pub fn path_for(&self, source: &Path) -> Result<PathBuf, ThumbnailError> {
        let name = source
            .file_name()
            .ok_or_else(|| ThumbnailError::InvalidPagePath(source.to_path_buf()))?;
        Ok(self.dir.join(name))
    }

    // キャッシュが利用可能か: 存在して読め、かつソースより古くない
    pub fn is_fresh(&self, source: &Path, cache_path: &Path) -> Result<bool, ThumbnailError> {
        let cache_meta = match fs::metadata(cache_path) {
            Ok(m) => m,
            Err(_) => return Ok(false), // 未生成または読めない → 生成パスへ
        };
        let source_meta = fs::metadata(source).map_err(|e| ThumbnailError::Io {
            path: source.to_path_buf(),
            source: e,
        })?;

        match (source_meta.modified(), cache_meta.modified()) {
            (Ok(source_mtime), Ok(cache_mtime)) => Ok(cache_is_fresh(source_mtime, cache_mtime)),
            // mtimeを返さないファイルシステムでは既存キャッシュをそのまま使う
            _ => Ok(true),
        }
    }
}

// 鮮度判定: キャッシュがソース以降に書かれていれば有効
pub fn cache_is_fresh(source_mtime: SystemTime, cache_mtime: SystemTime) -> bool {
    cache_mtime >= source_mtime
}

use std::io;
use std::path::PathBuf;
use thiserror::Error;

// サムネイル生成の失敗分類
// どれも実行単位で致命的: 発生した時点で残りのページ処理は中断する
#[derive(Debug, Error)]
pub enum ThumbnailError {
    /// ソース画像が読めない（対応デコーダなし・破損を含む）
    #[error("画像読み込みエラー: {path:?}: {source}")]
    UnreadableSource {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// キャッシュディレクトリを作成できない
    #[error("キャッシュディレクトリ作成エラー: {path:?}: {source}")]
    CreateCacheDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// ファイル読み書きの失敗
    #[error("ファイルI/Oエラー: {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// 既存キャッシュファイルが画像として読めない
    #[error("キャッシュ読み込みエラー: {path:?}: {source}")]
    CorruptCache {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// ページパスにファイル名成分がない
    #[error("無効なページパス: {0:?}")]
    InvalidPagePath(PathBuf),

    /// 画像サイズが制限外
    #[error("{0}")]
    InvalidDimensions(String),

    /// サムネイルのPNGエンコード失敗
    #[error("サムネイル書き出しエラー: {0}")]
    EncodeThumbnail(#[source] image::ImageError),

    /// 更新チャンネルの受信側が破棄された
    #[error("サムネイル更新チャンネルが閉じられました")]
    ChannelClosed,
}

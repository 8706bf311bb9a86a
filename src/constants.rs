// サムネイル設定（高さ固定・PNG形式）
pub const THUMBNAIL_HEIGHT: u32 = 100;  // 幅はアスペクト比から算出

// サムネイルキャッシュの配置（プロジェクト直下の隠しディレクトリ）
pub const PROJECT_DATA_DIR: &str = ".tess";
pub const THUMBS_SUBDIR: &str = "thumbs";

// 画像サイズ制限（展開爆弾防止）
pub const MAX_IMAGE_DIMENSION: u32 = 65535;      // 最大辺長
pub const MAX_PIXEL_COUNT: u64 = 100_000_000;    // 最大ピクセル数（100メガピクセル）

// ワーカー→UI転送チャンネルの容量（受信が遅れた場合はワーカー側が待つ）
pub const CHUNK_CHANNEL_CAPACITY: usize = 32;

// メモリキャッシュサイズ
pub const MEMORY_CACHE_MAX_SIZE: usize = 20;  // 最大20件をメモリに保持（メモリ節約）

use serde::{Deserialize, Serialize};

/// ページ1件とそのサムネイル
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageThumbnail {
    /// ソース画像のパス
    pub path: String,
    /// 生成済みサムネイル（PNGのdata URL）。未生成の間はNone
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl PageThumbnail {
    // サムネイル未生成のページを作成
    pub fn new(path: String) -> Self {
        Self {
            path,
            thumbnail: None,
        }
    }

    // サムネイルを持つ新しいエントリを返す（既存エントリは書き換えず置換する）
    pub fn with_thumbnail(&self, thumbnail: String) -> Self {
        Self {
            path: self.path.clone(),
            thumbnail: Some(thumbnail),
        }
    }
}

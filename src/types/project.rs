use serde::{Deserialize, Serialize};

/// プロジェクト設定（フロントエンドの新規プロジェクトダイアログで構築される）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    /// プロジェクトのルートディレクトリ
    pub directory: String,
}

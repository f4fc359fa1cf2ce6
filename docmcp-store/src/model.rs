#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub id: String, // file-name-like token, e.g. "plan.md"
    pub content: String,
}

impl Document {
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
        }
    }

    /// 内容のMIMEタイプ
    ///
    /// 内容は常にテキストなので、`.pdf` や `.docx` でも text/plain を返す。
    pub fn mime_type(&self) -> &'static str {
        Self::mime_type_for(&self.id)
    }

    pub fn mime_type_for(id: &str) -> &'static str {
        let is_markdown = id
            .rsplit_once('.')
            .is_some_and(|(_, ext)| ext.eq_ignore_ascii_case("md"));

        if is_markdown { "text/markdown" } else { "text/plain" }
    }
}

/// 編集成功時の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOutcome {
    pub doc_id: String,
    pub old_string: String,
    pub new_string: String,
    pub replacements: usize,
}

impl EditOutcome {
    /// クライアントに返す確認メッセージ
    pub fn message(&self) -> String {
        format!(
            "Successfully replaced '{}' with '{}' in '{}'",
            self.old_string, self.new_string, self.doc_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_type_from_extension() {
        assert_eq!(Document::new("plan.md", "").mime_type(), "text/markdown");
        assert_eq!(Document::new("NOTES.MD", "").mime_type(), "text/markdown");
        assert_eq!(Document::new("spec.txt", "").mime_type(), "text/plain");
        assert_eq!(Document::new("no-extension", "").mime_type(), "text/plain");
        // 拡張子が .pdf / .docx でも中身はテキスト
        assert_eq!(Document::new("report.pdf", "").mime_type(), "text/plain");
        assert_eq!(Document::new("financials.docx", "").mime_type(), "text/plain");
    }

    #[test]
    fn test_edit_outcome_message() {
        let outcome = EditOutcome {
            doc_id: "plan.md".to_string(),
            old_string: "implementation".to_string(),
            new_string: "rollout".to_string(),
            replacements: 1,
        };
        assert_eq!(
            outcome.message(),
            "Successfully replaced 'implementation' with 'rollout' in 'plan.md'"
        );
    }
}

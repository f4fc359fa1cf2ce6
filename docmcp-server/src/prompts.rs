//! プロンプトテンプレート
//!
//! どちらもドキュメントIDを埋め込むだけの純粋関数で、
//! IDが存在するかどうかは確認しない。

/// ドキュメントをMarkdownに書き直させる指示文
pub fn format_prompt(doc_id: &str) -> String {
    format!(
        "Please rewrite the document '{doc_id}' in proper markdown format.

Steps:
1. Use the read_doc_contents tool to fetch the current document content
2. Reformat the content using proper markdown syntax (headers, lists, emphasis, etc.)
3. Use the edit_document tool to replace the old content with the new markdown-formatted content
4. Confirm the changes were successful

Make sure to preserve all the original information while improving the formatting."
    )
}

/// ドキュメントを2〜3文で要約させる指示文
pub fn summarize_prompt(doc_id: &str) -> String {
    format!(
        "Please provide a concise summary of the document '{doc_id}'.

Steps:
1. Use the read_doc_contents tool to fetch the document content
2. Analyze the key points and main ideas
3. Provide a brief, clear summary (2-3 sentences)

Focus on the most important information and keep it concise."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_prompt_names_document_and_tools() {
        let text = format_prompt("plan.md");
        assert!(text.starts_with("Please rewrite the document 'plan.md' in proper markdown format."));
        let read_at = text.find("read_doc_contents").unwrap();
        let edit_at = text.find("edit_document").unwrap();
        assert!(read_at < edit_at);
        assert!(text.ends_with("while improving the formatting."));
    }

    #[test]
    fn test_summarize_prompt_names_document() {
        let text = summarize_prompt("report.pdf");
        assert!(text.starts_with("Please provide a concise summary of the document 'report.pdf'."));
        assert!(text.contains("1. Use the read_doc_contents tool to fetch the document content"));
        assert!(text.contains("(2-3 sentences)"));
        assert!(!text.contains("edit_document"));
    }

    #[test]
    fn test_prompts_do_not_validate_ids() {
        assert!(format_prompt("does-not-exist").contains("'does-not-exist'"));
        assert!(summarize_prompt("").contains("the document ''"));
    }
}

use crate::session::TodoItem;

/// One item per line, `[x]` / `[ ]` marking completion. An empty list is an empty file.
pub fn todo_list(items: &[TodoItem]) -> Vec<u8> {
    let mut out = String::new();
    for item in items {
        let mark = if item.done { "[x]" } else { "[ ]" };
        // Keep one item per line even if someone pasted a newline in
        let text = item.text.replace(['\r', '\n'], " ");
        out.push_str(&format!("{mark} {text}\n"));
    }
    out.into_bytes()
}

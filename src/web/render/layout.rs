use super::Notice;

/// The feature tabs, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Tasks,
    Todos,
    Ideas,
    Notes,
    Finance,
}

impl Tab {
    pub const ALL: [Tab; 5] = [Tab::Tasks, Tab::Todos, Tab::Ideas, Tab::Notes, Tab::Finance];

    pub fn path(self) -> &'static str {
        match self {
            Tab::Tasks => "/tasks",
            Tab::Todos => "/todos",
            Tab::Ideas => "/ideas",
            Tab::Notes => "/notes",
            Tab::Finance => "/finance",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tab::Tasks => "📝 Task Splitter",
            Tab::Todos => "🗂️ Todo List",
            Tab::Ideas => "💡 Idea Generator",
            Tab::Notes => "📚 Notes Cleaner",
            Tab::Finance => "💰 Finance Manager",
        }
    }
}

/// Full HTML document: header, tab bar, optional notice, then `body`.
pub fn page(active: Tab, notice: Option<&Notice>, body: &str) -> String {
    let tabs: String = Tab::ALL
        .iter()
        .map(|tab| {
            let current = if *tab == active {
                r#" class="active" aria-current="page""#
            } else {
                ""
            };
            format!(r#"<a href="{}"{}>{}</a>"#, tab.path(), current, tab.label())
        })
        .collect();

    let notice = notice.map(Notice::to_html).unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Student Command Center · {title}</title>
<link rel="stylesheet" href="/assets/style.css">
</head>
<body>
<header><h1>📚 Student Command Center</h1></header>
<nav class="tabs">{tabs}</nav>
<main>
{notice}
{body}
</main>
</body>
</html>
"#,
        title = active.label(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_marks_active_tab() {
        let html = page(Tab::Ideas, None, "<p>hi</p>");
        assert!(html.contains(r#"<a href="/ideas" class="active" aria-current="page">"#));
        assert!(html.contains(r#"<a href="/tasks">"#));
        assert!(html.contains("<p>hi</p>"));
        assert_eq!(html.matches("<a href=").count(), Tab::ALL.len());
    }

    #[test]
    fn test_page_renders_notice() {
        let html = page(Tab::Todos, Some(&Notice::success("Task added.")), "");
        assert!(html.contains("notice-success"));
        assert!(html.contains("Task added."));
    }
}

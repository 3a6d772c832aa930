//! Bodies for each feature tab. Every piece of user or model text goes
//! through `escape_html` or the Markdown renderers.

use super::{escape_html, markdown};
use crate::assistant::IDEA_CATEGORIES;
use crate::session::{EXPENSE_CATEGORIES, ExpenseLedger, TodoList};
use chrono::NaiveDate;
use std::fmt::Write;

pub fn tasks(task: &str, steps: &[String]) -> String {
    let mut html = String::from(
        r#"<section class="card">
<h2>Break a big task into small steps</h2>
<form method="post" action="/tasks">
<label for="task">Enter a big task</label>
<textarea id="task" name="task" rows="3" placeholder="Prepare final year project presentation">"#,
    );
    html.push_str(&escape_html(task));
    html.push_str(
        r#"</textarea>
<button type="submit">Split Task</button>
</form>
</section>
"#,
    );

    if !steps.is_empty() {
        html.push_str("<section class=\"card result\">\n<h3>Steps</h3>\n<ol class=\"steps\">\n");
        for step in steps {
            let _ = writeln!(html, "<li>{}</li>", markdown::inline_to_html(step));
        }
        html.push_str("</ol>\n</section>\n");
    }
    html
}

pub fn todos(list: &TodoList) -> String {
    let mut html = String::from(
        r#"<section class="card">
<h2>Your todo list</h2>
<form method="post" action="/todos" class="inline">
<input type="text" name="text" placeholder="Add a new task" aria-label="New task" autofocus>
<button type="submit">Add Task</button>
</form>
"#,
    );

    if list.is_empty() {
        html.push_str("<p class=\"muted\">No tasks yet.</p>\n");
    } else {
        html.push_str("<ul class=\"todos\">\n");
        for (index, item) in list.items().iter().enumerate() {
            let (class, mark, action) = if item.done {
                ("done", "☑", "Mark as not done")
            } else {
                ("", "☐", "Mark as done")
            };
            let _ = writeln!(
                html,
                r#"<li class="{class}"><form method="post" action="/todos/{index}/toggle"><button type="submit" class="check" title="{action}" aria-label="{action}">{mark}</button></form><span>{text}</span></li>"#,
                text = escape_html(&item.text),
            );
        }
        html.push_str("</ul>\n");
        let _ = writeln!(
            html,
            r#"<p class="muted">{} of {} done</p>"#,
            list.completed(),
            list.len()
        );
    }

    html.push_str(
        r#"<div class="actions">
<form method="post" action="/todos/clear"><button type="submit" class="secondary">Remove completed</button></form>
<a class="button" href="/todos/export" download>Export as TXT</a>
</div>
</section>
"#,
    );
    html
}

pub fn ideas(category: &str, custom_prompt: &str, ideas: &[String]) -> String {
    let selected = if category.trim().is_empty() {
        IDEA_CATEGORIES[0]
    } else {
        category
    };

    let mut html = String::from(
        r#"<section class="card">
<h2>Generate ideas</h2>
<form method="post" action="/ideas">
<label for="category">Category</label>
<select id="category" name="category">
"#,
    );
    for option in IDEA_CATEGORIES {
        let attr = if *option == selected { " selected" } else { "" };
        let _ = writeln!(
            html,
            r#"<option value="{value}"{attr}>{value}</option>"#,
            value = escape_html(option)
        );
    }
    html.push_str(
        r#"</select>
<label for="custom_prompt">Or describe what you need (overrides the category)</label>
<input type="text" id="custom_prompt" name="custom_prompt" placeholder="e.g. ideas for a hackathon project" value=""#,
    );
    html.push_str(&escape_html(custom_prompt));
    html.push_str(
        r#"">
<button type="submit">Generate Ideas</button>
</form>
</section>
"#,
    );

    if !ideas.is_empty() {
        html.push_str("<section class=\"card result\">\n<h3>Ideas</h3>\n<ol class=\"ideas\">\n");
        for idea in ideas {
            let _ = writeln!(html, "<li>{}</li>", markdown::inline_to_html(idea));
        }
        html.push_str("</ol>\n</section>\n");
    }
    html
}

pub fn notes(pasted: &str, cleaned: Option<&str>) -> String {
    let mut html = String::from(
        r#"<section class="card">
<h2>Clean up your notes</h2>
<form method="post" action="/notes" enctype="multipart/form-data">
<label for="notes">Paste your notes</label>
<textarea id="notes" name="notes" rows="8">"#,
    );
    html.push_str(&escape_html(pasted));
    html.push_str(
        r#"</textarea>
<label for="pdf">Or upload a PDF (used instead of pasted text)</label>
<input type="file" id="pdf" name="pdf" accept="application/pdf,.pdf">
<button type="submit">Clean Notes</button>
</form>
</section>
"#,
    );

    if let Some(cleaned) = cleaned {
        html.push_str("<section class=\"card result\">\n<h3>Cleaned notes</h3>\n<div class=\"markdown\">\n");
        html.push_str(&markdown::to_html(cleaned));
        html.push_str(
            r#"</div>
<div class="actions"><a class="button" href="/notes/export" download>Export as PDF</a></div>
</section>
"#,
        );
    }
    html
}

pub fn finance(ledger: &ExpenseLedger, advice: Option<&str>, today: NaiveDate) -> String {
    let mut html = String::from(
        r#"<section class="card">
<h2>Track your expenses</h2>
<form method="post" action="/finance" class="grid">
<label>Description <input type="text" name="description" placeholder="Coffee"></label>
<label>Amount <input type="text" name="amount" inputmode="decimal" placeholder="4.50"></label>
<label>Category <input type="text" name="category" list="expense-categories" value="Food"></label>
<datalist id="expense-categories">
"#,
    );
    for category in EXPENSE_CATEGORIES {
        let _ = writeln!(html, r#"<option value="{}">"#, escape_html(category));
    }
    let _ = write!(
        html,
        r#"</datalist>
<label>Date <input type="date" name="date" value="{}"></label>
<button type="submit">Add Expense</button>
</form>
</section>
"#,
        today.format("%Y-%m-%d")
    );

    html.push_str("<section class=\"card\">\n<h3>Expenses</h3>\n");
    if ledger.is_empty() {
        html.push_str("<p class=\"muted\">No expenses recorded yet.</p>\n");
    } else {
        html.push_str(
            "<table class=\"expenses\">\n<thead><tr><th>Date</th><th>Description</th><th class=\"num\">Amount</th><th>Category</th></tr></thead>\n<tbody>\n",
        );
        for row in ledger.rows() {
            let _ = writeln!(
                html,
                r#"<tr><td>{}</td><td>{}</td><td class="num">{:.2}</td><td>{}</td></tr>"#,
                row.date.format("%Y-%m-%d"),
                escape_html(&row.description),
                row.amount,
                escape_html(&row.category)
            );
        }
        let _ = writeln!(
            html,
            r#"</tbody>
<tfoot><tr><th colspan="2">Total</th><th class="num">{:.2}</th><th></th></tr></tfoot>
</table>"#,
            ledger.total()
        );
    }
    html.push_str(
        r#"<div class="actions">
<form method="post" action="/finance/tip"><button type="submit">Get Savings Tip</button></form>
<a class="button" href="/finance/export" download>Export as Excel</a>
</div>
</section>
"#,
    );

    if let Some(advice) = advice {
        html.push_str("<section class=\"card result\">\n<h3>Savings advice</h3>\n<div class=\"markdown\">\n");
        html.push_str(&markdown::to_html(advice));
        html.push_str("</div>\n</section>\n");
    }
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tasks_lists_steps_in_order() {
        let html = tasks("Plan <trip>", &["Book".to_string(), "Pack".to_string()]);
        assert!(html.contains("Plan &lt;trip&gt;"));
        let book = html.find("<li>Book</li>").unwrap();
        let pack = html.find("<li>Pack</li>").unwrap();
        assert!(book < pack);
    }

    #[test]
    fn test_steps_and_ideas_render_emphasis() {
        let steps = vec!["**Research**: find sources".to_string(), "<i>x</i>".to_string()];
        let html = tasks("Essay", &steps);
        assert!(html.contains("<li><strong>Research</strong>: find sources</li>"));
        assert!(html.contains("&lt;i&gt;x&lt;/i&gt;"));

        let html = ideas("Study Ideas", "", &["Try *spaced* repetition".to_string()]);
        assert!(html.contains("<li>Try <em>spaced</em> repetition</li>"));
    }

    #[test]
    fn test_todos_renders_toggle_forms() {
        let mut list = TodoList::new();
        list.add("Buy milk").unwrap();
        list.add("Read <chapter>").unwrap();
        list.toggle(0).unwrap();

        let html = todos(&list);
        assert!(html.contains(r#"action="/todos/0/toggle""#));
        assert!(html.contains(r#"action="/todos/1/toggle""#));
        assert!(html.contains(r#"<li class="done">"#));
        assert!(html.contains("Read &lt;chapter&gt;"));
        assert!(html.contains("1 of 2 done"));
    }

    #[test]
    fn test_todos_empty_state() {
        assert!(todos(&TodoList::new()).contains("No tasks yet."));
    }

    #[test]
    fn test_ideas_keeps_selection_and_prompt() {
        let html = ideas("Personal Goals", "robots \"now\"", &[]);
        assert!(html.contains(r#"<option value="Personal Goals" selected>"#));
        assert!(html.contains("robots &quot;now&quot;"));
        assert!(!html.contains("<h3>Ideas</h3>"));
    }

    #[test]
    fn test_notes_shows_export_only_after_cleaning() {
        assert!(!notes("", None).contains("/notes/export"));
        let html = notes("", Some("# Topic\n- point"));
        assert!(html.contains("/notes/export"));
        assert!(html.contains("<h1>Topic</h1>"));
    }

    #[test]
    fn test_finance_table_and_total() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let mut ledger = ExpenseLedger::new();
        ledger.add("Coffee", 4.5, "Food", Some(date)).unwrap();
        ledger.add("Bus", 2.0, "Transport", Some(date)).unwrap();

        let html = finance(&ledger, Some("**Cook** more"), date);
        assert!(html.contains("<td>Coffee</td>"));
        assert!(html.contains(r#"<td class="num">4.50</td>"#));
        assert!(html.contains(r#"<th class="num">6.50</th>"#));
        assert!(html.contains("<strong>Cook</strong>"));
        assert!(html.contains(r#"value="2026-03-01""#));
    }
}

// HTML views — hand-built pages for the form front end
//
// One shared shell, no template engine. Everything user-supplied goes
// through escape() before it reaches a page.

use crate::planner::Schedule;
use crate::retrieval::Strategy;

/// Escape text for inclusion in HTML bodies and attribute values
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const STYLE: &str = "body{font-family:sans-serif;max-width:44rem;margin:2rem auto;padding:0 1rem;color:#222}\
textarea,input{font:inherit;width:100%;box-sizing:border-box;margin:.25rem 0 .75rem}\
textarea{height:9rem}\
.row{display:flex;gap:1rem}.row label{flex:1}\
.problems{color:#a40000}.meta{color:#555;font-size:.9rem}\
pre{background:#f4f4f4;padding:1rem;overflow-x:auto}\
button{font:inherit;padding:.4rem 1.2rem}";

fn shell(body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>studyhall</title>\n<style>{}</style>\n</head>\n<body>\n\
         <h1>studyhall</h1>\n{}\n</body>\n</html>\n",
        STYLE, body
    )
}

/// The task entry form
pub fn index_page() -> String {
    shell(
        r#"<p>One task per line: <code>name, minutes, importance[, deadline]</code>.
Importance runs 1 (lowest) to 5 (highest); deadlines are <code>YYYY-MM-DD</code>.</p>
<form method="post" action="/plan" enctype="multipart/form-data">
<label>Tasks
<textarea name="tasks" placeholder="Study Machine Learning, 60, 5, 2026-09-01&#10;Review Compiler Design, 45, 4&#10;Practice Networking, 30, 3"></textarea>
</label>
<div class="row">
<label>Day start (HH:MM)
<input type="text" name="day_start" placeholder="09:00">
</label>
<label>Available hours
<input type="text" name="hours" placeholder="8">
</label>
</div>
<label>Extra study notes (plain text, optional)
<input type="file" name="corpus">
</label>
<button type="submit">Plan the day</button>
</form>"#,
    )
}

/// Schedule plus narration after a plan request
pub fn plan_page(
    schedule: Option<&Schedule>,
    trace: &[String],
    problems: &[String],
    strategy: Strategy,
    entries: usize,
) -> String {
    let mut body = String::new();

    if !problems.is_empty() {
        body.push_str("<ul class=\"problems\">\n");
        for problem in problems {
            body.push_str(&format!("<li>{}</li>\n", escape(problem)));
        }
        body.push_str("</ul>\n");
    }

    match schedule {
        Some(schedule) if !schedule.is_empty() => {
            body.push_str("<h2>Planned schedule</h2>\n<pre>");
            body.push_str(&escape(&schedule.render()));
            body.push_str("</pre>\n");

            body.push_str("<h2>Execution</h2>\n<pre>");
            for line in trace {
                body.push_str(&escape(line));
                body.push('\n');
            }
            body.push_str("</pre>\n");
        }
        _ => body.push_str("<p>No tasks to schedule.</p>\n"),
    }

    body.push_str(&format!(
        "<p class=\"meta\">Note retrieval: {} strategy over {} entries.</p>\n",
        strategy.as_str(),
        entries
    ));
    body.push_str("<p><a href=\"/\">Plan another day</a></p>");

    shell(&body)
}

/// Whole-request failure (malformed upload, broken form encoding)
pub fn problem_page(message: &str) -> String {
    shell(&format!(
        "<p class=\"problems\">{}</p>\n<p><a href=\"/\">Back to the form</a></p>",
        escape(message)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::{DayWindow, Planner};
    use crate::tasks::Task;
    use chrono::NaiveTime;

    fn sample_schedule() -> Schedule {
        let window = DayWindow::new(NaiveTime::from_hms_opt(9, 0, 0).unwrap(), 8);
        Planner::new(window).plan(vec![
            Task::new("Study <b>Machine</b> Learning", 60, 5, None).unwrap(),
        ])
    }

    #[test]
    fn test_escape_covers_html_metacharacters() {
        assert_eq!(
            escape(r#"<a href="x">&'"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#39;"
        );
        assert_eq!(escape("plain text"), "plain text");
    }

    #[test]
    fn test_index_page_has_form_fields() {
        let page = index_page();
        assert!(page.contains("name=\"tasks\""));
        assert!(page.contains("name=\"day_start\""));
        assert!(page.contains("name=\"hours\""));
        assert!(page.contains("name=\"corpus\""));
        assert!(page.contains("action=\"/plan\""));
        assert!(page.contains("multipart/form-data"));
    }

    #[test]
    fn test_plan_page_escapes_task_names() {
        let schedule = sample_schedule();
        let page = plan_page(Some(&schedule), &[], &[], Strategy::Embedding, 4);
        assert!(page.contains("Study &lt;b&gt;Machine&lt;/b&gt; Learning"));
        assert!(!page.contains("<b>Machine</b>"));
    }

    #[test]
    fn test_plan_page_without_tasks_says_so() {
        let page = plan_page(None, &[], &["line 1: bad".to_string()], Strategy::Keyword, 4);
        assert!(page.contains("No tasks to schedule."));
        assert!(page.contains("line 1: bad"));
        assert!(page.contains("keyword strategy"));
    }
}

use crate::data::{DataView, FetchStatus};
use crate::models::{Parameter, Row};
use crate::rows::CSV_HEADERS;

pub fn render_login(alert: Option<&str>, username: &str) -> String {
    LOGIN_HTML
        .replace("{{STYLE}}", STYLE)
        .replace("{{ALERT}}", &alert_block(alert))
        .replace("{{USERNAME}}", &escape_html(username))
}

pub fn render_data(view: &DataView) -> String {
    let loading = view.status == FetchStatus::Loading;
    let results = if !loading && !view.rows.is_empty() {
        render_results(&view.rows)
    } else {
        String::new()
    };

    DATA_HTML
        .replace("{{STYLE}}", STYLE)
        .replace("{{START}}", &escape_html(&view.form.start_time))
        .replace("{{END}}", &escape_html(&view.form.end_time))
        .replace("{{OPTIONS}}", &parameter_options(&view.form.parameter))
        .replace("{{ERROR}}", &error_banner(view.error.as_deref()))
        .replace(
            "{{LOADING}}",
            if loading {
                r#"<div class="spinner" role="status">Loading...</div>"#
            } else {
                ""
            },
        )
        .replace("{{RESULTS}}", &results)
}

fn alert_block(alert: Option<&str>) -> String {
    match alert {
        Some(message) => format!(
            r#"<div class="alert" role="alertdialog">{}</div>"#,
            escape_html(message)
        ),
        None => String::new(),
    }
}

fn error_banner(error: Option<&str>) -> String {
    match error {
        Some(message) => format!(
            r#"<div class="banner" role="alert">{}</div>"#,
            escape_html(message)
        ),
        None => String::new(),
    }
}

fn parameter_options(selected: &str) -> String {
    let mut options = vec![option_tag("", "<em>None</em>", selected.is_empty())];
    options.extend(Parameter::ALL.into_iter().map(|parameter| {
        let value = parameter.as_str();
        option_tag(value, parameter.label(), value == selected)
    }));
    options.join("\n          ")
}

fn option_tag(value: &str, label: &str, selected: bool) -> String {
    let selected = if selected { " selected" } else { "" };
    format!(r#"<option value="{value}"{selected}>{label}</option>"#)
}

fn render_results(rows: &[Row]) -> String {
    let head = CSV_HEADERS
        .iter()
        .map(|label| format!("<th>{label}</th>"))
        .collect::<String>();
    let body = rows
        .iter()
        .map(|row| {
            let cells = row
                .fields()
                .iter()
                .map(|value| format!("<td>{}</td>", escape_html(value)))
                .collect::<String>();
            format!("<tr>{cells}</tr>")
        })
        .collect::<Vec<_>>()
        .join("\n        ");

    format!(
        r#"<table>
      <thead><tr>{head}</tr></thead>
      <tbody>
        {body}
      </tbody>
    </table>
    <a class="button" href="/data.csv" download>Download CSV</a>"#
    )
}

fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

const STYLE: &str = r#"
    :root {
      --bg-1: #f8f3e6;
      --ink: #2b2a28;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.9);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: linear-gradient(135deg, var(--bg-1), #ffe9d4 60%, #f9f2e9 100%);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      display: grid;
      place-items: start center;
      padding: 48px 18px;
    }

    .app {
      width: min(960px, 100%);
      background: var(--card);
      border-radius: 24px;
      box-shadow: var(--shadow);
      padding: 32px;
      display: grid;
      gap: 20px;
    }

    .app.narrow {
      width: min(440px, 100%);
    }

    h1 {
      font-family: "Georgia", serif;
      margin: 0;
    }

    form {
      display: flex;
      flex-wrap: wrap;
      gap: 12px;
      align-items: end;
    }

    form.stacked {
      flex-direction: column;
      align-items: stretch;
    }

    label {
      display: grid;
      gap: 4px;
      font-size: 0.85rem;
      color: #5f5c57;
    }

    input, select {
      padding: 10px 12px;
      border-radius: 10px;
      border: 1px solid rgba(47, 72, 88, 0.2);
      font-size: 1rem;
    }

    button, .button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 12px 20px;
      font-size: 1rem;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent);
      color: white;
      text-decoration: none;
      display: inline-block;
      width: fit-content;
    }

    button.secondary {
      background: transparent;
      color: var(--accent-2);
      border: 1px solid var(--accent-2);
    }

    .alert, .banner {
      border-radius: 12px;
      padding: 12px 16px;
      background: #fde2dd;
      color: #c63b2b;
    }

    .spinner {
      text-align: center;
      color: #6b645d;
    }

    table {
      width: 100%;
      border-collapse: collapse;
      background: white;
      border-radius: 12px;
      overflow: hidden;
    }

    th, td {
      text-align: left;
      padding: 10px 12px;
      border-bottom: 1px solid rgba(47, 72, 88, 0.08);
    }
"#;

const LOGIN_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Login</title>
  <style>{{STYLE}}</style>
</head>
<body>
  <main class="app narrow">
    <h1>Login</h1>
    {{ALERT}}
    <form class="stacked" method="post" action="/login">
      <label>Username
        <input name="username" value="{{USERNAME}}" autocomplete="username" required />
      </label>
      <label>Password
        <input name="password" type="password" autocomplete="current-password" required />
      </label>
      <button type="submit">Login</button>
    </form>
  </main>
</body>
</html>
"#;

const DATA_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Data Viewer</title>
  <style>{{STYLE}}</style>
</head>
<body>
  <main class="app">
    <h1>Data Viewer</h1>
    <form method="post" action="/logout">
      <button class="secondary" type="submit">Logout</button>
    </form>

    <form method="post" action="/data">
      <label>Start Time
        <input name="start_time" type="datetime-local" value="{{START}}" required />
      </label>
      <label>End Time
        <input name="end_time" type="datetime-local" value="{{END}}" required />
      </label>
      <label>Parameter
        <select name="parameter">
          {{OPTIONS}}
        </select>
      </label>
      <button type="submit">Fetch Data</button>
    </form>

    {{ERROR}}
    {{LOADING}}
    {{RESULTS}}
  </main>
</body>
</html>
"#;

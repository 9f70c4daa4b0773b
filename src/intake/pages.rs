//! The two fixed HTML responses: the validation-error listing and the
//! success confirmation. Markup is deliberately small and self-contained;
//! the registration form itself is a static page served elsewhere.

use crate::intake::handlers::FORM_PATH;
use crate::intake::validate::{escape, ValidationFailure};

/// Error page with one list item per failure, in evaluation order.
#[must_use]
pub fn error_page(failures: &[ValidationFailure]) -> String {
    let mut items = String::new();

    for failure in failures {
        items.push_str("      <li>");
        items.push_str(&escape(&failure.to_string()));
        items.push_str("</li>\n");
    }

    format!(
        r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Submission errors</title>
  <style> body{{font-family:Arial, sans-serif;padding:24px}} .err{{color:#dc2626}} </style>
</head>
<body>
  <h1>There were problems with your submission</h1>
  <ul class="err">
{items}  </ul>
  <p><a href="{FORM_PATH}">Go back to the form</a></p>
</body>
</html>
"#
    )
}

/// Success page echoing the (already escaped) full name.
#[must_use]
pub fn success_page(fullname: &str) -> String {
    format!(
        r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Registration Successful</title>
  <style>
    body{{font-family:system-ui, sans-serif; background:#f6f9fc; padding:40px}}
    .card{{max-width:650px;margin:20px auto;background:#fff;padding:24px;border-radius:12px}}
    h1{{margin:0 0 8px}}
    .success{{color:#16a34a;font-weight:600}}
    .btn{{display:inline-block;margin-top:14px;padding:10px 14px;border-radius:8px;text-decoration:none;background:#3b82f6;color:white}}
  </style>
</head>
<body>
  <div class="card">
    <h1>Thank you, {fullname}</h1>
    <p class="success">Your form has been recorded successfully.</p>
    <p><a class="btn" href="{FORM_PATH}">Submit another response</a></p>
  </div>
</body>
</html>
"#
    )
}

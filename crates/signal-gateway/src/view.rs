//! Rendered admin view: the pending queue plus collection counts.
//!
//! Deliberately minimal server-rendered HTML; the moderation actions
//! themselves go through the JSON endpoints.

use signal_moderation::SignalRecord;

/// Render the admin dashboard for the current pending snapshot.
pub fn render_admin_view(pending: &[SignalRecord], approved_count: usize) -> String {
    let mut rows = String::new();
    for record in pending {
        rows.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape(&record.id),
            escape(&record.title),
            escape(&record.start_time),
            escape(&record.submitted_at),
        ));
    }

    format!(
        "<!doctype html>\n<html>\n<head><meta charset=\"utf-8\"><title>Signalboard moderation</title></head>\n<body>\n\
         <h1>Signalboard moderation</h1>\n\
         <p>{pending_count} pending &middot; {approved_count} approved</p>\n\
         <table>\n<tr><th>Id</th><th>Title</th><th>Start</th><th>Submitted</th></tr>\n{rows}</table>\n\
         </body>\n</html>\n",
        pending_count = pending.len(),
    )
}

/// Escape text for safe embedding in HTML.
fn escape(s: &str) -> String {
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

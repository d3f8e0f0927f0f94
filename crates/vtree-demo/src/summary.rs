#![forbid(unsafe_code)]

//! JSON run summary.

use serde_json::{Value, json};
use vtree::{Checked, Host, TreeView, collect_checked, node_count, visible_row_count};

/// Describe the widget's last render and the tree's selection state.
pub fn summarize<H: Host>(view: &TreeView<'_, H>) -> Value {
    let window = view.window();
    let stats = view.scheduler_stats();
    let checked: Vec<&str> = collect_checked(view.tree(), Checked::All)
        .into_iter()
        .map(|node| node.value())
        .collect();

    json!({
        "nodes": node_count(view.tree()),
        "rows": visible_row_count(view.tree()),
        "scrollTop": view.scroll_top(),
        "window": {
            "start": window.range.start,
            "end": window.range.end,
            "beforeHeight": window.before_height,
            "afterHeight": window.after_height,
            "totalHeight": window.total_height,
            "virtualized": window.virtualized,
        },
        "renders": view.render_count(),
        "lastReason": view.last_render_reason().map(|r| r.as_str()),
        "scheduler": {
            "immediate": stats.immediate,
            "debouncedRequests": stats.debounced_requests,
            "superseded": stats.superseded,
            "fired": stats.fired,
            "cancelled": stats.cancelled,
        },
        "checked": checked,
    })
}

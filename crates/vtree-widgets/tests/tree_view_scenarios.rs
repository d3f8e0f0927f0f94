//! End-to-end widget scenarios against an in-memory host.

use std::time::{Duration, Instant};

use vtree_core::{Checked, Hit, Node, RowPart, collect_checked};
use vtree_runtime::MemoryHost;
use vtree_widgets::{Action, OptionsPatch, TreeOptions, TreeView};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn flat_rows(n: usize) -> Vec<Node> {
    (0..n).map(|i| Node::new(format!("n{i}"), format!("Row {i}"))).collect()
}

fn row_count(html: &str) -> usize {
    html.matches("class=\"tree-item ").count()
}

// ============================================================================
// Check propagation
// ============================================================================

#[test]
fn parent_toggle_cascades_to_only_child() {
    let mut tree = vec![Node::new("a", "A").with_expand(true).child(Node::new("a1", "A1"))];
    {
        let mut view =
            TreeView::create(MemoryHost::new(), &mut tree, TreeOptions::default()).unwrap();
        view.click_value("a", RowPart::Body).unwrap();
        assert_eq!(view.tree()[0].checked(), Checked::All);
        assert_eq!(view.tree()[0].children()[0].checked(), Checked::All);

        // the only child is now none, so the parent follows it
        view.click_value("a1", RowPart::Body).unwrap();
        assert_eq!(view.tree()[0].children()[0].checked(), Checked::None);
        assert_eq!(view.tree()[0].checked(), Checked::None);
        view.destroy().unwrap();
    }
    assert!(collect_checked(&tree, Checked::All).is_empty());
}

#[test]
fn unchecking_one_of_two_children_leaves_parent_half() {
    let mut tree = vec![
        Node::new("a", "A")
            .with_expand(true)
            .child(Node::new("a1", "A1"))
            .child(Node::new("a2", "A2")),
    ];
    let options = TreeOptions::default().with_multiple(true);
    let mut view = TreeView::create(MemoryHost::new(), &mut tree, options).unwrap();
    view.click(Hit::new(0, RowPart::Checkbox)).unwrap();
    view.click(Hit::new(1, RowPart::Checkbox)).unwrap();

    assert_eq!(view.tree()[0].checked(), Checked::Half);
    let html = view.host().content();
    assert!(html.contains(r#"<div class="tree-item checked-half" value="a">"#));
    assert!(html.contains(r#"<span class="icon icon-check-half"></span>"#));
}

#[test]
fn toggling_a_collapsed_parent_reaches_hidden_children() {
    let mut tree = vec![
        Node::new("p", "P")
            .child(Node::new("c1", "C1"))
            .child(Node::new("c2", "C2").child(Node::new("g", "G"))),
    ];
    let mut view = TreeView::create(MemoryHost::new(), &mut tree, TreeOptions::default()).unwrap();
    assert_eq!(view.click_value("p", RowPart::Body).unwrap(), Some(Action::ToggleChecked));
    // the collapsed subtree is not rendered but still updated
    assert_eq!(row_count(view.host().content()), 1);
    let checked: Vec<_> = collect_checked(view.tree(), Checked::All)
        .iter()
        .map(|n| n.value().to_owned())
        .collect();
    assert_eq!(checked, ["p", "c1", "c2", "g"]);
}

// ============================================================================
// Windowing
// ============================================================================

#[test]
fn thousand_rows_scrolled_to_2600() {
    let mut tree = flat_rows(1000);
    let mut view = TreeView::create(MemoryHost::new(), &mut tree, TreeOptions::default()).unwrap();
    let t0 = Instant::now();
    assert!(view.scroll_at(2600, t0));
    assert!(view.tick_at(t0 + ms(50)).unwrap());

    let window = view.window().clone();
    assert_eq!(window.before_height, 2300);
    assert_eq!(window.range, 88..122);
    assert_eq!(
        window.before_height + window.materialized_height() + window.after_height,
        26_000
    );

    let html = view.host().content();
    assert_eq!(row_count(html), 34);
    assert!(html.starts_with(r#"<div style="height: 2300px"></div><div class="tree-item checked-none" value="n88">"#));
}

#[test]
fn small_tree_is_rendered_whole_at_any_offset() {
    let mut tree = flat_rows(299);
    let mut view = TreeView::create(MemoryHost::new(), &mut tree, TreeOptions::default()).unwrap();
    let t0 = Instant::now();
    view.scroll_at(5_000, t0);
    view.tick_at(t0 + ms(60)).unwrap();
    let html = view.host().content();
    assert_eq!(row_count(html), 299);
    assert!(!html.contains("height:"));
}

#[test]
fn collapsing_while_scrolled_shrinks_to_remaining_rows() {
    let children = flat_rows(2000);
    let mut tree = vec![
        Node::new("root", "Root")
            .with_expand(true)
            .with_children(children),
    ];
    let options = TreeOptions::default().with_max_line(10);
    let mut view = TreeView::create(MemoryHost::new(), &mut tree, options).unwrap();
    let t0 = Instant::now();
    view.scroll_at(40_000, t0);
    view.tick_at(t0 + ms(50)).unwrap();
    assert!(view.window().range.start > 1000);

    view.click_value("root", RowPart::ExpandIcon).unwrap();
    let html = view.host().content();
    assert_eq!(row_count(html), 1);
    assert!(!view.window().virtualized);
    assert_eq!(view.window().range, 0..1);
    assert_eq!(view.window().total_height, 26);
}

// ============================================================================
// Scroll gate + debounce
// ============================================================================

#[test]
fn sub_threshold_scrolls_never_render() {
    let mut tree = flat_rows(1000);
    let mut view = TreeView::create(MemoryHost::new(), &mut tree, TreeOptions::default()).unwrap();
    let t0 = Instant::now();

    for (i, top) in [10, 25, 40, 60, 74].into_iter().enumerate() {
        assert!(!view.scroll_at(top, t0 + ms(i as u64 * 5)));
    }
    assert!(!view.tick_at(t0 + ms(1_000)).unwrap());
    assert_eq!(view.render_count(), 1);

    // crossing the quarter-height threshold arms exactly one render
    assert!(view.scroll_at(90, t0 + ms(1_000)));
    assert!(view.tick_at(t0 + ms(1_050)).unwrap());
    assert!(!view.tick_at(t0 + ms(2_000)).unwrap());
    assert_eq!(view.render_count(), 2);
    assert_eq!(view.scroll_top(), 90);
}

#[test]
fn scroll_burst_renders_once_with_latest_offset() {
    let mut tree = flat_rows(1000);
    let mut view = TreeView::create(MemoryHost::new(), &mut tree, TreeOptions::default()).unwrap();
    let t0 = Instant::now();

    for (i, top) in [400, 800, 1_200, 1_600, 2_600].into_iter().enumerate() {
        assert!(view.scroll_at(top, t0 + ms(i as u64 * 10)));
        assert!(!view.tick_at(t0 + ms(i as u64 * 10 + 5)).unwrap());
    }
    assert!(view.tick_at(t0 + ms(40 + 50)).unwrap());
    assert_eq!(view.render_count(), 2);
    assert_eq!(view.window().range.start, 88);

    let stats = view.scheduler_stats();
    assert_eq!(stats.debounced_requests, 5);
    assert_eq!(stats.superseded, 4);
    assert_eq!(stats.fired, 1);
}

// ============================================================================
// Options + teardown
// ============================================================================

#[test]
fn debounce_option_changes_delay() {
    let mut tree = flat_rows(1000);
    let mut view = TreeView::create(MemoryHost::new(), &mut tree, TreeOptions::default()).unwrap();
    view.set_option(OptionsPatch::new().debounce(ms(200))).unwrap();
    let t0 = Instant::now();
    view.scroll_at(1_000, t0);
    assert!(!view.tick_at(t0 + ms(150)).unwrap());
    assert!(view.tick_at(t0 + ms(200)).unwrap());
}

#[test]
fn callback_from_patch_replaces_previous() {
    let mut first = 0;
    let mut second = 0;
    let mut tree = flat_rows(3);
    {
        let mut view =
            TreeView::create(MemoryHost::new(), &mut tree, TreeOptions::default()).unwrap();
        view.on_change(|_| first += 1);
        view.click_value("n0", RowPart::Body).unwrap();
        view.set_option(OptionsPatch::new().on_change(|_| second += 1))
            .unwrap();
        view.click_value("n1", RowPart::Body).unwrap();
        view.click_value("n2", RowPart::Body).unwrap();
        view.destroy().unwrap();
    }
    assert_eq!((first, second), (1, 2));
}

#[test]
fn destroy_hands_back_host_and_tree() {
    let mut tree = vec![Node::new("a", "A").child(Node::new("a1", "A1"))];
    let mut view = TreeView::create(MemoryHost::new(), &mut tree, TreeOptions::default()).unwrap();
    view.click_value("a", RowPart::ExpandIcon).unwrap();
    let host = view.destroy().unwrap();

    assert!(host.content().is_empty());
    assert!(!host.is_attached());
    assert_eq!(host.outputs().render_count(), 2);
    // mutations are visible to the owner once the widget is gone
    assert!(tree[0].is_expanded());
}

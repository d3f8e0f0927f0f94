#![forbid(unsafe_code)]

//! The tree widget instance.
//!
//! A [`TreeView`] borrows the application's tree mutably for its whole
//! life, owns a [`Host`] to render into, and wires the pieces together:
//!
//! ```text
//! click / click_value / click_at ─► router ─► toggle_checked / toggle_expand ─┐
//! scroll ─► ScrollGate ─► RenderScheduler (debounced) ─► tick ───────────────┤
//! set_option / render_now ───────────────────────────────────────────────────┤
//!                                                                             ▼
//!                          flatten ─► ViewportConfig::compute ─► RowMarkup ─► Host::commit
//! ```
//!
//! Checked and expand toggles render immediately. Scroll renders go through
//! the gate and the debounce, so the host must call [`TreeView::tick`] (or
//! arm a timer from [`TreeView::time_until_render`]).
//!
//! # Example
//!
//! ```
//! use vtree_core::{Checked, Node, RowPart};
//! use vtree_runtime::MemoryHost;
//! use vtree_widgets::{TreeOptions, TreeView};
//!
//! let mut tree = vec![Node::new("a", "A").child(Node::new("a1", "A1"))];
//! let mut view = TreeView::create(MemoryHost::new(), &mut tree, TreeOptions::default()).unwrap();
//! view.click_value("a", RowPart::Body).unwrap();
//! let host = view.destroy().unwrap();
//!
//! assert_eq!(host.outputs().render_count(), 2);
//! assert_eq!(tree[0].children()[0].checked(), Checked::All);
//! ```

use std::fmt;
use std::time::{Duration, Instant};

use vtree_core::check::toggle_checked;
use vtree_core::event::{Hit, RowPart};
use vtree_core::flatten::flatten;
use vtree_core::lookup::{find_by_value, find_by_value_mut};
use vtree_core::node::Node;
use vtree_render::hit::hit_test;
use vtree_render::viewport::Window;
use vtree_runtime::host::Host;
use vtree_runtime::scheduler::{RenderReason, RenderScheduler, ScheduleAction, SchedulerStats};
use vtree_runtime::scroll_gate::ScrollGate;

use crate::options::{ChangeCallback, OptionsPatch, TreeOptions};
use crate::router::{Action, route};

/// A live tree widget bound to a host and a borrowed tree.
pub struct TreeView<'t, H: Host> {
    host: H,
    tree: &'t mut Vec<Node>,
    options: TreeOptions,
    on_change: Option<ChangeCallback<'t>>,
    scheduler: RenderScheduler,
    gate: ScrollGate,
    scroll_top: u32,
    window: Window,
    render_count: u64,
    last_reason: Option<RenderReason>,
}

impl<'t, H: Host> TreeView<'t, H> {
    /// Attach to `host`, size the container, and render once.
    pub fn create(
        mut host: H,
        tree: &'t mut Vec<Node>,
        options: TreeOptions,
    ) -> Result<Self, H::Error> {
        host.attach()?;
        host.set_max_height(options.height)?;

        let mut view = Self {
            host,
            tree,
            options,
            on_change: None,
            scheduler: RenderScheduler::new(options.scheduler()),
            gate: ScrollGate::new(options.height),
            scroll_top: 0,
            window: Window {
                range: 0..0,
                before_height: 0,
                after_height: 0,
                total_height: 0,
                row_height: options.viewport().row_px(),
                virtualized: false,
            },
            render_count: 0,
            last_reason: None,
        };
        view.render_immediate(RenderReason::Create)?;
        Ok(view)
    }

    /// Install the callback run after a node's checked state is toggled.
    pub fn on_change(&mut self, callback: impl FnMut(&Node) + 't) {
        self.on_change = Some(Box::new(callback));
    }

    /// Merge `patch` into the current options and render immediately.
    pub fn set_option(&mut self, patch: OptionsPatch<'t>) -> Result<(), H::Error> {
        let previous_height = self.options.height;
        patch.apply_to(&mut self.options);
        let OptionsPatch {
            tree, on_change, ..
        } = patch;
        if let Some(tree) = tree {
            self.tree = tree;
        }
        if let Some(callback) = on_change {
            self.on_change = Some(callback);
        }

        self.scheduler.set_delay(self.options.debounce);
        self.gate.set_container_height(self.options.height);
        if self.options.height != previous_height {
            self.host.set_max_height(self.options.height)?;
        }
        self.render_immediate(RenderReason::Options)
    }

    /// Route a click on flattened row `hit.row`.
    ///
    /// Returns the action that ran, or `None` when the part routes nowhere,
    /// the row does not exist, or the action was a no-op.
    pub fn click(&mut self, hit: Hit) -> Result<Option<Action>, H::Error> {
        if route(hit.part).is_none() {
            return Ok(None);
        }
        let value = match flatten(self.tree.as_slice()).get(hit.row) {
            Some(row) => row.value().to_owned(),
            None => {
                vtree_core::debug!(
                    target: vtree_core::logging::TARGET_INPUT,
                    row = hit.row,
                    "click on missing row"
                );
                return Ok(None);
            }
        };
        self.click_value(&value, hit.part)
    }

    /// Route a click on the row whose `value` attribute is `value`.
    pub fn click_value(&mut self, value: &str, part: RowPart) -> Result<Option<Action>, H::Error> {
        let Some(action) = route(part) else {
            return Ok(None);
        };
        vtree_core::debug!(
            target: vtree_core::logging::TARGET_INPUT,
            value,
            part = part.as_str(),
            action = action.as_str(),
            "routed click"
        );
        let applied = match action {
            Action::ToggleChecked => self.apply_toggle_checked(value)?,
            Action::ToggleExpand => self.apply_toggle_expand(value)?,
        };
        Ok(applied.then_some(action))
    }

    /// Route a click at content coordinates `(x, y)` (`y` includes the
    /// host's scroll offset) against the last rendered window.
    pub fn click_at(&mut self, x: u64, y: u64) -> Result<Option<Action>, H::Error> {
        let hit = {
            let rows = flatten(self.tree.as_slice());
            hit_test(&self.window, &rows, &self.options.geometry(), x, y)
        };
        match hit {
            Some(hit) => self.click(hit),
            None => Ok(None),
        }
    }

    /// Report a new scroll offset.
    ///
    /// Returns whether the offset passed the gate and armed a render.
    pub fn scroll(&mut self, scroll_top: u32) -> bool {
        self.scroll_at(scroll_top, Instant::now())
    }

    /// Report a new scroll offset at a specific time (for testing).
    pub fn scroll_at(&mut self, scroll_top: u32, now: Instant) -> bool {
        if !self.gate.offer(scroll_top) {
            return false;
        }
        self.scroll_top = scroll_top;
        self.scheduler.request_debounced_at(RenderReason::Scroll, now);
        true
    }

    /// Fire a due debounced render. Returns whether a render happened.
    pub fn tick(&mut self) -> Result<bool, H::Error> {
        self.tick_at(Instant::now())
    }

    /// Fire a due debounced render at a specific time (for testing).
    pub fn tick_at(&mut self, now: Instant) -> Result<bool, H::Error> {
        match self.scheduler.tick_at(now) {
            ScheduleAction::Render { reason, .. } => {
                self.render_pass(reason)?;
                Ok(true)
            }
            ScheduleAction::None => Ok(false),
        }
    }

    /// Time until the pending debounced render is due.
    #[must_use]
    pub fn time_until_render(&self, now: Instant) -> Option<Duration> {
        self.scheduler.time_until_render(now)
    }

    /// Render synchronously, dropping any pending debounced render.
    pub fn render_now(&mut self) -> Result<(), H::Error> {
        self.render_immediate(RenderReason::Explicit)
    }

    /// Tear down: cancel the pending render, detach, and clear the
    /// container. Ends the tree borrow and hands the host back.
    pub fn destroy(mut self) -> Result<H, H::Error> {
        self.scheduler.cancel();
        self.host.detach()?;
        self.host.clear()?;
        vtree_core::debug!(
            target: vtree_core::logging::TARGET_RENDER,
            renders = self.render_count,
            "tree view destroyed"
        );
        Ok(self.host)
    }

    #[must_use]
    pub fn tree(&self) -> &[Node] {
        self.tree.as_slice()
    }

    #[must_use]
    pub fn options(&self) -> &TreeOptions {
        &self.options
    }

    /// Last accepted scroll offset.
    #[must_use]
    pub fn scroll_top(&self) -> u32 {
        self.scroll_top
    }

    /// Window of the last render.
    #[must_use]
    pub fn window(&self) -> &Window {
        &self.window
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    #[must_use]
    pub fn render_count(&self) -> u64 {
        self.render_count
    }

    #[must_use]
    pub fn last_render_reason(&self) -> Option<RenderReason> {
        self.last_reason
    }

    #[must_use]
    pub fn scheduler_stats(&self) -> SchedulerStats {
        self.scheduler.stats()
    }

    #[must_use]
    pub fn has_pending_render(&self) -> bool {
        self.scheduler.has_pending()
    }

    fn apply_toggle_checked(&mut self, value: &str) -> Result<bool, H::Error> {
        if toggle_checked(self.tree.as_mut_slice(), value).is_none() {
            vtree_core::debug!(
                target: vtree_core::logging::TARGET_INPUT,
                value,
                "toggle on unknown value"
            );
            return Ok(false);
        }
        if let Some(callback) = self.on_change.as_mut()
            && let Some(node) = find_by_value(self.tree.as_slice(), value)
        {
            callback(node);
        }
        self.render_immediate(RenderReason::ToggleChecked)?;
        Ok(true)
    }

    fn apply_toggle_expand(&mut self, value: &str) -> Result<bool, H::Error> {
        let toggled = find_by_value_mut(self.tree.as_mut_slice(), value)
            .is_some_and(|node| node.toggle_expand());
        if !toggled {
            return Ok(false);
        }
        self.render_immediate(RenderReason::ToggleExpand)?;
        Ok(true)
    }

    fn render_immediate(&mut self, reason: RenderReason) -> Result<(), H::Error> {
        match self.scheduler.request_immediate(reason) {
            ScheduleAction::Render { reason, .. } => self.render_pass(reason),
            ScheduleAction::None => Ok(()),
        }
    }

    fn render_pass(&mut self, reason: RenderReason) -> Result<(), H::Error> {
        let rows = flatten(self.tree.as_slice());
        let window = self.options.viewport().compute(rows.len(), self.scroll_top);

        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "tree_view.render",
            reason = reason.as_str(),
            rows = rows.len(),
            start = window.range.start,
            end = window.range.end,
            virtualized = window.virtualized
        )
        .entered();

        let html = self.options.markup().render(&rows, &window);
        self.host.commit(&html)?;

        self.window = window;
        self.render_count += 1;
        self.last_reason = Some(reason);
        Ok(())
    }
}

impl<H: Host + fmt::Debug> fmt::Debug for TreeView<'_, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeView")
            .field("host", &self.host)
            .field("roots", &self.tree.len())
            .field("options", &self.options)
            .field("scroll_top", &self.scroll_top)
            .field("window", &self.window)
            .field("render_count", &self.render_count)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vtree_core::node::Checked;
    use vtree_runtime::host::{MemoryHost, MemoryHostError};

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn sample() -> Vec<Node> {
        vec![
            Node::new("a", "A")
                .with_expand(true)
                .child(Node::new("a1", "A1"))
                .child(Node::new("a2", "A2")),
            Node::new("b", "B"),
        ]
    }

    #[test]
    fn create_attaches_sizes_and_renders() {
        let mut tree = sample();
        let view = TreeView::create(MemoryHost::new(), &mut tree, TreeOptions::default()).unwrap();
        let host = view.host();
        assert!(host.is_attached());
        assert_eq!(host.outputs().max_height, Some(300));
        assert_eq!(host.outputs().render_count(), 1);
        assert_eq!(view.last_render_reason(), Some(RenderReason::Create));
        assert_eq!(view.window().range, 0..4);
    }

    #[test]
    fn create_fails_on_attached_host() {
        let mut host = MemoryHost::new();
        host.attach().unwrap();
        let mut tree = sample();
        let err = TreeView::create(host, &mut tree, TreeOptions::default()).unwrap_err();
        assert_eq!(err, MemoryHostError::AlreadyAttached);
    }

    #[test]
    fn body_click_toggles_checked_and_renders() {
        let mut tree = sample();
        let mut view =
            TreeView::create(MemoryHost::new(), &mut tree, TreeOptions::default()).unwrap();
        let action = view.click(Hit::new(1, RowPart::Body)).unwrap();
        assert_eq!(action, Some(Action::ToggleChecked));
        assert_eq!(view.render_count(), 2);
        assert_eq!(view.tree()[0].checked(), Checked::Half);
        assert!(view.host().content().contains(r#"class="tree-item checked-all" value="a1""#));
    }

    #[test]
    fn expand_icon_collapses_without_touching_checked() {
        let mut tree = sample();
        let mut view =
            TreeView::create(MemoryHost::new(), &mut tree, TreeOptions::default()).unwrap();
        let action = view.click(Hit::new(0, RowPart::ExpandIcon)).unwrap();
        assert_eq!(action, Some(Action::ToggleExpand));
        assert_eq!(view.window().range, 0..2);
        assert_eq!(view.tree()[0].checked(), Checked::None);
        assert!(view.host().content().contains("icon-node-close"));
    }

    #[test]
    fn leaf_expand_and_unknown_value_are_noops() {
        let mut tree = sample();
        let mut view =
            TreeView::create(MemoryHost::new(), &mut tree, TreeOptions::default()).unwrap();
        assert_eq!(view.click_value("b", RowPart::ExpandIcon).unwrap(), None);
        assert_eq!(view.click_value("zzz", RowPart::Body).unwrap(), None);
        assert_eq!(view.click(Hit::new(99, RowPart::Body)).unwrap(), None);
        assert_eq!(view.click_value("a", RowPart::Indent).unwrap(), None);
        assert_eq!(view.render_count(), 1);
    }

    #[test]
    fn click_at_uses_row_geometry() {
        let mut tree = sample();
        let options = TreeOptions::default().with_multiple(true);
        let mut view = TreeView::create(MemoryHost::new(), &mut tree, options).unwrap();
        // row 0 icon spans x in [0, 16)
        assert_eq!(view.click_at(4, 5).unwrap(), Some(Action::ToggleExpand));
        // after collapsing, row 1 is "b"; its checkbox is at [16, 32)
        assert_eq!(view.click_at(20, 26 + 5).unwrap(), Some(Action::ToggleChecked));
        assert_eq!(view.tree()[1].checked(), Checked::All);
        // below the last row
        assert_eq!(view.click_at(50, 26 * 10).unwrap(), None);
    }

    #[test]
    fn change_callback_sees_toggled_node() {
        let mut seen = Vec::new();
        let mut tree = sample();
        {
            let mut view =
                TreeView::create(MemoryHost::new(), &mut tree, TreeOptions::default()).unwrap();
            view.on_change(|node| seen.push((node.value().to_owned(), node.checked())));
            view.click_value("a", RowPart::Body).unwrap();
            view.click_value("a2", RowPart::Checkbox).unwrap();
            view.destroy().unwrap();
        }
        assert_eq!(
            seen,
            vec![
                ("a".to_owned(), Checked::All),
                ("a2".to_owned(), Checked::None),
            ]
        );
    }

    #[test]
    fn scroll_is_gated_and_debounced() {
        let mut tree: Vec<Node> = (0..1000).map(|i| Node::new(format!("n{i}"), "row")).collect();
        let mut view =
            TreeView::create(MemoryHost::new(), &mut tree, TreeOptions::default()).unwrap();
        let t0 = Instant::now();

        assert!(!view.scroll_at(50, t0));
        assert!(view.scroll_at(2600, t0));
        assert!(!view.tick_at(t0 + ms(10)).unwrap());
        assert_eq!(view.time_until_render(t0 + ms(10)), Some(ms(40)));
        assert!(view.tick_at(t0 + ms(50)).unwrap());

        assert_eq!(view.window().range.start, 88);
        assert_eq!(view.render_count(), 2);
        assert_eq!(view.last_render_reason(), Some(RenderReason::Scroll));
    }

    #[test]
    fn immediate_render_drops_pending_scroll() {
        let mut tree: Vec<Node> = (0..1000).map(|i| Node::new(format!("n{i}"), "row")).collect();
        let mut view =
            TreeView::create(MemoryHost::new(), &mut tree, TreeOptions::default()).unwrap();
        let t0 = Instant::now();
        view.scroll_at(2600, t0);
        view.render_now().unwrap();
        // the synchronous render already used the new offset
        assert_eq!(view.window().range.start, 88);
        assert!(!view.has_pending_render());
        assert!(!view.tick_at(t0 + ms(100)).unwrap());
    }

    #[test]
    fn set_option_merges_and_rerenders() {
        let mut tree = sample();
        let mut other = vec![Node::new("x", "X")];
        let mut view =
            TreeView::create(MemoryHost::new(), &mut tree, TreeOptions::default()).unwrap();
        view.set_option(OptionsPatch::new().height(120).multiple(true))
            .unwrap();
        assert_eq!(view.options().height, 120);
        assert_eq!(view.options().indent, 20);
        assert_eq!(view.host().outputs().max_height, Some(120));
        assert!(view.host().content().contains("icon-check-none"));

        view.set_option(OptionsPatch::new().tree(&mut other)).unwrap();
        assert_eq!(view.tree().len(), 1);
        assert!(view.host().content().contains(r#"value="x""#));
        assert_eq!(view.render_count(), 3);
    }

    #[test]
    fn destroy_detaches_and_clears() {
        let mut tree = sample();
        let mut view =
            TreeView::create(MemoryHost::new(), &mut tree, TreeOptions::default()).unwrap();
        view.scroll_at(1_000, Instant::now());
        let host = view.destroy().unwrap();
        assert!(!host.is_attached());
        assert!(host.content().is_empty());
        assert_eq!(host.outputs().clears, 1);
        assert_eq!(host.outputs().detaches, 1);
    }
}

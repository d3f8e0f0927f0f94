#![forbid(unsafe_code)]

use std::fs::File;
use std::io::{BufReader, Write};
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use vtree::{MemoryHost, Node, RowPart, TreeOptions, TreeView};

use crate::summary::summarize;
use crate::synth::synthetic_tree;

#[derive(Debug, Parser)]
#[command(
    name = "vtree-demo",
    about = "Render a virtualized tree into memory and print the result",
    version
)]
pub struct Cli {
    /// Root nodes in the synthetic tree.
    #[arg(long, env = "VTREE_DEMO_ROOTS", default_value_t = 10)]
    pub roots: usize,

    /// Children per internal node in the synthetic tree.
    #[arg(long, env = "VTREE_DEMO_FANOUT", default_value_t = 100)]
    pub fanout: usize,

    /// Levels below each root in the synthetic tree.
    #[arg(long, env = "VTREE_DEMO_DEPTH", default_value_t = 1)]
    pub depth: usize,

    /// Load the tree from a JSON file instead of generating one.
    #[arg(long, env = "VTREE_DEMO_TREE")]
    pub tree: Option<PathBuf>,

    /// Load options from a JSON file (`lineHeight`, `maxLine`, ...).
    #[arg(long, env = "VTREE_DEMO_OPTIONS")]
    pub options: Option<PathBuf>,

    #[arg(long, env = "VTREE_DEMO_INDENT")]
    pub indent: Option<u32>,

    /// Container height in px.
    #[arg(long, env = "VTREE_DEMO_HEIGHT")]
    pub height: Option<u32>,

    /// Row height in px.
    #[arg(long, env = "VTREE_DEMO_LINE_HEIGHT")]
    pub line_height: Option<u32>,

    /// Row count at which windowing starts.
    #[arg(long, env = "VTREE_DEMO_MAX_LINE")]
    pub max_line: Option<usize>,

    /// Render checkboxes.
    #[arg(long, env = "VTREE_DEMO_MULTIPLE")]
    pub multiple: bool,

    /// Scroll offsets to replay, in order (comma separated).
    #[arg(long, value_delimiter = ',')]
    pub scroll: Vec<u32>,

    /// Node values to toggle checked (comma separated).
    #[arg(long, value_delimiter = ',')]
    pub toggle: Vec<String>,

    /// Node values to expand or collapse (comma separated).
    #[arg(long, value_delimiter = ',')]
    pub expand: Vec<String>,

    /// Print a JSON summary instead of the HTML.
    #[arg(long)]
    pub summary: bool,

    /// Emit logs as JSON lines on stderr.
    #[arg(long, env = "VTREE_DEMO_LOG_JSON")]
    pub log_json: bool,
}

impl Cli {
    /// Options file (if any) with command-line overrides applied.
    pub fn tree_options(&self) -> vtree::Result<TreeOptions> {
        let mut options = match &self.options {
            Some(path) => vtree::options_from_json(&std::fs::read_to_string(path)?)?,
            None => TreeOptions::default(),
        };
        if let Some(indent) = self.indent {
            options.indent = indent;
        }
        if let Some(height) = self.height {
            options.height = height;
        }
        if let Some(line_height) = self.line_height {
            options.line_height = line_height;
        }
        if let Some(max_line) = self.max_line {
            options.max_line = max_line;
        }
        if self.multiple {
            options.multiple = true;
        }
        Ok(options)
    }

    pub fn load_tree(&self) -> vtree::Result<Vec<Node>> {
        match &self.tree {
            Some(path) => vtree::tree_from_reader(BufReader::new(File::open(path)?)),
            None => Ok(synthetic_tree(self.roots, self.fanout, self.depth)),
        }
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    // A subscriber may already be installed when embedded; keep it.
    let _ = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}

pub fn run_from_env() -> vtree::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_json);
    let output = run(&cli)?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{output}")?;
    Ok(())
}

/// Execute the replay described by `cli` and return what should be printed.
pub fn run(cli: &Cli) -> vtree::Result<String> {
    let options = cli.tree_options()?;
    let mut tree = cli.load_tree()?;
    vtree::recompute_ancestors(&mut tree);
    tracing::info!(
        nodes = vtree::node_count(&tree),
        rows = vtree::visible_row_count(&tree),
        "tree ready"
    );

    let mut view = TreeView::create(MemoryHost::new(), &mut tree, options)?;
    for value in &cli.expand {
        if view.click_value(value, RowPart::ExpandIcon)?.is_none() {
            tracing::warn!(value = value.as_str(), "expand had no effect");
        }
    }
    for value in &cli.toggle {
        if view.click_value(value, RowPart::Body)?.is_none() {
            tracing::warn!(value = value.as_str(), "toggle had no effect");
        }
    }

    let mut now = Instant::now();
    for &top in &cli.scroll {
        let accepted = view.scroll_at(top, now);
        // let the debounce elapse before the next offset
        now += options.debounce;
        let rendered = view.tick_at(now)?;
        tracing::debug!(top, accepted, rendered, "scroll replayed");
    }

    let output = if cli.summary {
        serde_json::to_string_pretty(&summarize(&view))?
    } else {
        view.host().content().to_owned()
    };
    view.destroy()?;
    Ok(output)
}

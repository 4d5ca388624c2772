//! Text tree rendering of a normalized graph.
//!
//! Output is diagnostic, so rendering never fails: dangling edge targets
//! print as placeholders, shared (fan-in) nodes reprint as leaves, and a
//! node met again on its own active path prints once more and stops.
//! Cycles with no entry point are drawn from a pseudo-root after a warning
//! line.

pub mod writer;

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::graph::FlowGraph;
use crate::model::{Edge, ParsedNode, ParsedWorkflow, Platform};

use writer::{TreeWriter, child_prefix};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderOptions {
    /// Banner line printed above the tree, framed by rules.
    pub title: Option<String>,
    /// Prefix trigger nodes with `⚡ `.
    pub mark_triggers: bool,
    /// Width of the `=` rules around a titled tree.
    pub rule_width: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            title: None,
            mark_triggers: false,
            rule_width: 35,
        }
    }
}

/// Render with default options: the bare forest.
pub fn render(nodes: &[ParsedNode], edges: &[Edge]) -> String {
    render_with(nodes, edges, &RenderOptions::default())
}

pub fn render_with(nodes: &[ParsedNode], edges: &[Edge], options: &RenderOptions) -> String {
    let mut out = TreeWriter::new();
    write_section(&mut out, nodes, edges, options);
    out.finish()
}

/// Render a whole parse result. Records with summaries (Zapier) get one
/// section each; everything else is a single forest titled by the
/// workflow name unless `options.title` is set.
pub fn render_workflow(workflow: &ParsedWorkflow, options: &RenderOptions) -> String {
    let mut out = TreeWriter::new();

    if workflow.summaries.is_empty() {
        let mut options = options.clone();
        if options.title.is_none() {
            options.title = workflow.name.clone();
        }
        write_section(&mut out, &workflow.graph.nodes, &workflow.graph.edges, &options);
        return out.finish();
    }

    for (i, summary) in workflow.summaries.iter().enumerate() {
        if i > 0 {
            out.blank();
        }
        let ids: HashSet<&str> = summary.node_ids.iter().map(String::as_str).collect();
        let nodes: Vec<ParsedNode> = workflow
            .graph
            .nodes
            .iter()
            .filter(|n| ids.contains(n.id.as_str()))
            .cloned()
            .collect();
        let edges: Vec<Edge> = workflow
            .graph
            .edges
            .iter()
            .filter(|e| ids.contains(e.from_node_id.as_str()))
            .cloned()
            .collect();

        let section = RenderOptions {
            title: Some(format!(
                "{}: {} ({})",
                record_label(workflow.platform),
                summary.title,
                summary.status
            )),
            ..options.clone()
        };
        write_section(&mut out, &nodes, &edges, &section);
    }
    out.finish()
}

fn record_label(platform: Platform) -> &'static str {
    match platform {
        Platform::Zapier => "Zap",
        Platform::Make => "Scenario",
        Platform::N8n => "Workflow",
    }
}

fn write_section(out: &mut TreeWriter, nodes: &[ParsedNode], edges: &[Edge], options: &RenderOptions) {
    if let Some(title) = &options.title {
        out.line(title);
        out.rule(options.rule_width);
    }

    let graph = FlowGraph::build(nodes, edges);
    // Last node wins when ids collide (duplicate n8n names).
    let lookup: HashMap<&str, &ParsedNode> = nodes.iter().map(|n| (n.id.as_str(), n)).collect();
    let mut forest = Forest {
        graph: &graph,
        lookup,
        options,
        rendered: HashSet::new(),
        trees: 0,
    };
    forest.draw(out);

    if options.title.is_some() {
        out.rule(options.rule_width);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Revisit {
    /// Already drawn in another branch: fan-in or merge point.
    Shared,
    /// Already on the active path: a true cycle.
    Cycle,
}

enum Frame<'g> {
    Enter {
        id: &'g str,
        prefix: String,
        is_last: bool,
    },
    Exit(&'g str),
}

struct Forest<'g> {
    graph: &'g FlowGraph,
    lookup: HashMap<&'g str, &'g ParsedNode>,
    options: &'g RenderOptions,
    rendered: HashSet<&'g str>,
    trees: usize,
}

impl<'g> Forest<'g> {
    fn draw(&mut self, out: &mut TreeWriter) {
        for root in self.graph.roots() {
            self.draw_tree(out, root);
        }

        // Whatever is left sits on a cycle that no root reaches.
        let mut warned = false;
        let leftovers: Vec<&'g str> = self.graph.ids().collect();
        for id in leftovers {
            if self.rendered.contains(id) {
                continue;
            }
            if !warned {
                warn!(start = id, "cyclic graph without entry point; using pseudo-root");
                if self.trees > 0 {
                    out.blank();
                }
                out.line(&format!("! cycle without entry point, starting at '{}'", id));
                warned = true;
                self.trees = 0;
            }
            self.draw_tree(out, id);
        }
    }

    /// Pre-order depth-first print with an explicit stack.
    fn draw_tree(&mut self, out: &mut TreeWriter, root: &'g str) {
        if self.trees > 0 {
            out.blank();
        }
        self.trees += 1;

        let mut path: HashSet<&'g str> = HashSet::new();
        let mut stack = vec![Frame::Enter {
            id: root,
            prefix: String::new(),
            is_last: true,
        }];

        while let Some(frame) = stack.pop() {
            let (id, prefix, is_last) = match frame {
                Frame::Exit(id) => {
                    path.remove(id);
                    continue;
                }
                Frame::Enter { id, prefix, is_last } => (id, prefix, is_last),
            };

            let revisit = if path.contains(id) {
                Some(Revisit::Cycle)
            } else if self.rendered.contains(id) {
                Some(Revisit::Shared)
            } else {
                None
            };
            out.branch(&prefix, is_last, &self.label(id, revisit));
            if revisit.is_some() {
                continue;
            }

            self.rendered.insert(id);
            path.insert(id);
            stack.push(Frame::Exit(id));

            let children = self.graph.successors(id);
            let next_prefix = child_prefix(&prefix, is_last);
            let last = children.len().saturating_sub(1);
            for (i, child) in children.into_iter().enumerate().rev() {
                stack.push(Frame::Enter {
                    id: child,
                    prefix: next_prefix.clone(),
                    is_last: i == last,
                });
            }
        }
    }

    fn label(&self, id: &str, revisit: Option<Revisit>) -> String {
        let mut label = match self.lookup.get(id) {
            Some(node) => {
                let marker = if self.options.mark_triggers && node.is_trigger {
                    "⚡ "
                } else {
                    ""
                };
                format!(
                    "{}{} | {} ({} - {})",
                    marker,
                    node.action.map(|a| a.as_str()).unwrap_or("null"),
                    node.operation_name,
                    node.service,
                    node.kind
                )
            }
            None => format!("Unknown Node ({})", id),
        };
        match revisit {
            Some(Revisit::Shared) => label.push_str(" (see above)"),
            Some(Revisit::Cycle) => label.push_str(" (cycle)"),
            None => {}
        }
        label
    }
}

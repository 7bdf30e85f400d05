use std::path::PathBuf;

use clap::Parser;
use mascii::{Hierarchy, NodeId, domain::percent_of};
use serde_json::{Value, json};
use tracing::instrument;

use super::{
    Context, OutputFormat,
    terminal::{Colorize, human_size},
};

#[derive(Debug, Parser)]
#[command(about = "Print the ownership hierarchy with accumulated sizes")]
pub struct Tree {
    /// The scene file
    file: PathBuf,

    /// Only descend this many levels below the root
    #[arg(short, long, value_name = "LEVELS")]
    depth: Option<usize>,

    /// Output format (table, json)
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,
}

impl Tree {
    #[instrument(level = "debug", skip(self, context), fields(file = %self.file.display()))]
    pub fn run(self, context: &Context) -> anyhow::Result<()> {
        let (scene, records) = context.load(&self.file)?;
        let hierarchy = context.build(&records)?;
        let file_size = scene.source().size();

        match self.output {
            OutputFormat::Json => {
                let nodes: Vec<_> = hierarchy
                    .children(hierarchy.root())
                    .map(|id| to_json(&hierarchy, id, self.depth.map(|depth| depth.saturating_sub(1))))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&nodes)?);
            }
            OutputFormat::Table => {
                for line in render(&hierarchy, self.depth, file_size) {
                    println!("{line}");
                }
            }
        }

        Ok(())
    }
}

/// Renders every node down to `depth` levels, one indented line each.
fn render(hierarchy: &Hierarchy, depth: Option<usize>, file_size: u64) -> Vec<String> {
    let mut lines = Vec::new();
    let mut stack: Vec<(NodeId, usize)> = hierarchy
        .children(hierarchy.root())
        .map(|id| (id, 1))
        .collect();
    stack.reverse();

    while let Some((id, level)) = stack.pop() {
        let node = &hierarchy[id];
        let name = if node.name().is_empty() {
            "<unnamed>"
        } else {
            node.name()
        };
        lines.push(format!(
            "{}{} {} {}",
            "  ".repeat(level - 1),
            name,
            format!("({})", node.node_type()).dim(),
            format!(
                "{} [{}%]",
                human_size(node.total_size()),
                percent_of(node.total_size(), file_size)
            )
            .info()
        ));

        if depth.is_none_or(|depth| level < depth) {
            let mut children: Vec<_> = hierarchy.children(id).map(|child| (child, level + 1)).collect();
            children.reverse();
            stack.extend(children);
        }
    }

    lines
}

fn to_json(hierarchy: &Hierarchy, id: NodeId, remaining: Option<usize>) -> Value {
    let node = &hierarchy[id];
    let children: Vec<_> = match remaining {
        Some(0) => Vec::new(),
        _ => hierarchy
            .children(id)
            .map(|child| to_json(hierarchy, child, remaining.map(|depth| depth - 1)))
            .collect(),
    };
    json!({
        "name": node.name(),
        "type": node.node_type(),
        "line": node.line(),
        "size": node.size(),
        "total_size": node.total_size(),
        "children": children,
    })
}

#[cfg(test)]
mod tests {
    use mascii::Config;
    use test_case::test_case;

    use super::*;
    use crate::cli::tests::context;

    fn hierarchy() -> Hierarchy {
        let (file, context) = context(Config::default());
        let (_scene, records) = context.load(file.path()).unwrap();
        context.build(&records).unwrap()
    }

    #[test_case(None, 5 ; "unlimited")]
    #[test_case(Some(1), 3 ; "top level only")]
    #[test_case(Some(2), 4 ; "two levels")]
    fn depth_limits_rendered_nodes(depth: Option<usize>, expected: usize) {
        assert_eq!(render(&hierarchy(), depth, 1000).len(), expected);
    }

    #[test]
    fn children_are_indented_below_parents() {
        let lines = render(&hierarchy(), None, 1000);
        assert!(lines[0].starts_with("group1 "));
        assert!(lines[1].starts_with("  pCube1 "));
        assert!(lines[2].starts_with("    pCubeShape1 "));
        assert!(lines[3].starts_with("clip "));
    }

    #[test]
    fn json_respects_depth() {
        let hierarchy = hierarchy();
        let group = hierarchy.children(hierarchy.root()).next().unwrap();

        let shallow = to_json(&hierarchy, group, Some(0));
        assert_eq!(shallow["children"].as_array().unwrap().len(), 0);

        let deep = to_json(&hierarchy, group, None);
        assert_eq!(deep["children"][0]["name"], "pCube1");
        assert_eq!(deep["children"][0]["children"][0]["name"], "pCubeShape1");
    }
}

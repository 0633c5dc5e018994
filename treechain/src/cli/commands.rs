use std::io::Write;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::CliResult;
use crate::cli::output;
use crate::config::{global_config_path, RenderStyle, Settings, CONFIG_PATH_VAR};
use crate::domain::{Composite, NodeId, TreeViewConvert};
use crate::sample::{sample_chain, sample_tree, SAMPLE_REQUESTS};

pub fn execute_command<W: Write>(cli: &Cli, settings: &Settings, out: &mut W) -> CliResult<()> {
    match &cli.command {
        None | Some(Commands::Demo) => _demo(settings, out),
        Some(Commands::Tree { style }) => _tree(style.unwrap_or(settings.render.style), out),
        Some(Commands::Request { values }) => _request(values, out),
        Some(Commands::Config { command }) => _config(command, settings, out),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            generate(*shell, &mut cmd, "treechain", out);
            Ok(())
        }
    }
}

fn render(tree: &Composite, root: NodeId, style: RenderStyle) -> CliResult<String> {
    Ok(match style {
        RenderStyle::Inline => tree.operate(root)?,
        RenderStyle::Tree => tree.to_tree(root)?.to_string().trim_end().to_string(),
    })
}

#[instrument(skip(settings, out))]
fn _demo<W: Write>(settings: &Settings, out: &mut W) -> CliResult<()> {
    _tree(settings.render.style, out)?;
    _request(&SAMPLE_REQUESTS, out)
}

#[instrument(skip(out))]
fn _tree<W: Write>(style: RenderStyle, out: &mut W) -> CliResult<()> {
    let (tree, root) = sample_tree()?;
    debug!(nodes = tree.len(), "sample tree built");
    writeln!(out, "{}", render(&tree, root, style)?)?;
    Ok(())
}

#[instrument(skip(out))]
fn _request<W: Write>(values: &[i64], out: &mut W) -> CliResult<()> {
    let (chain, head) = sample_chain()?;
    for &value in values {
        let outcome = chain.handle_request(head, value)?;
        writeln!(out, "{outcome}")?;
    }
    Ok(())
}

#[instrument(skip(settings, out))]
fn _config<W: Write>(command: &ConfigCommands, settings: &Settings, out: &mut W) -> CliResult<()> {
    match command {
        ConfigCommands::Show => write!(out, "{}", settings.to_toml()?)?,
        ConfigCommands::Path => {
            writeln!(out, "{}", output::header("Config paths"))?;
            let global = global_config_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "<unavailable>".to_string());
            writeln!(out, "  global: {global}")?;
            let explicit = std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| "<unset>".to_string());
            writeln!(out, "  {CONFIG_PATH_VAR}: {explicit}")?;
        }
        ConfigCommands::Template => write!(out, "{}", Settings::template())?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn run(args: &[&str]) -> String {
        let cli = Cli::try_parse_from(args).unwrap();
        let mut out = Vec::new();
        execute_command(&cli, &Settings::default(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn given_no_subcommand_when_running_then_prints_demo() {
        assert_eq!(
            run(&["treechain"]),
            "Composite1: [1 2 Composite2: [3 4 5 ] ] \n\
             5 handled by handler1\n\
             15 not handled (passed through 3 handlers)\n"
        );
    }

    #[test]
    fn given_negative_request_when_running_then_reports_unhandled() {
        assert_eq!(
            run(&["treechain", "request", "-3", "0"]),
            "-3 not handled (passed through 3 handlers)\n0 handled by handler1\n"
        );
    }

    #[test]
    fn given_tree_style_when_rendering_then_one_node_per_line() {
        let text = run(&["treechain", "tree", "--style", "tree"]);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "Composite1");
        assert!(lines[3].ends_with("Composite2"));
    }
}

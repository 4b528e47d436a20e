//! Parent-child link commands

use clap::{Args, Subcommand};

use crate::output::{self, OutputFormat};
use crate::{AppContext, Cli};
use stemma_core::{ParentChildLink, PersonId};
use stemma_storage::TreeStore;

#[derive(Args)]
pub struct LinkArgs {
    #[command(subcommand)]
    pub command: LinkCommands,
}

#[derive(Subcommand)]
pub enum LinkCommands {
    /// Link a parent to a child
    Add {
        /// Parent person id
        parent: String,
        /// Child person id
        child: String,
        /// Mark the relationship as adoptive
        #[arg(long)]
        adoptive: bool,
        /// Free-text notes
        #[arg(long)]
        notes: Option<String>,
    },
    /// List all parent-child links
    List,
}

pub fn run(args: &LinkArgs, cli: &Cli, ctx: &mut AppContext) -> anyhow::Result<()> {
    match &args.command {
        LinkCommands::Add {
            parent,
            child,
            adoptive,
            notes,
        } => {
            let parent_id: PersonId = parent.parse()?;
            let child_id: PersonId = child.parse()?;

            if ctx.tree.is_ancestor_of(&child_id, &parent_id) {
                tracing::warn!(
                    "{} is an ancestor of {}; this link closes a generational cycle",
                    child_id,
                    parent_id
                );
            }

            let mut link = ParentChildLink::new(parent_id, child_id, *adoptive);
            if let Some(text) = notes {
                link = link.with_notes(text.clone());
            }

            let link = ctx.tree.add_link(link)?.clone();
            ctx.store.append_link(&link)?;
            tracing::info!("Linked parent {} -> child {}", link.parent, link.child);

            match cli.output_format() {
                OutputFormat::Json => println!("{}", output::to_json(&link)?),
                OutputFormat::Table => {
                    println!("Linked: {}", output::link_line(&link, &ctx.tree));
                }
            }
        }
        LinkCommands::List => {
            let links = ctx.tree.links();

            match cli.output_format() {
                OutputFormat::Json => println!("{}", output::to_json(&links)?),
                OutputFormat::Table => {
                    if links.is_empty() {
                        println!("No parent-child links recorded.");
                    } else {
                        println!("{} links recorded:", links.len());
                        for link in links {
                            println!("  {}", output::link_line(link, &ctx.tree));
                        }
                    }
                }
            }
        }
    }

    Ok(())
}

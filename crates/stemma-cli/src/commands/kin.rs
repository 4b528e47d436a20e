//! Derived relationship queries

use clap::{Args, Subcommand};

use crate::output::{self, OutputFormat};
use crate::{AppContext, Cli};
use stemma_core::{Person, PersonId, UnionRecord};

#[derive(Args)]
pub struct KinArgs {
    #[command(subcommand)]
    pub command: KinCommands,
}

#[derive(Subcommand)]
pub enum KinCommands {
    /// Recorded parents of a person
    Parents {
        /// Person id
        id: String,
    },
    /// Recorded children of a person
    Children {
        /// Person id
        id: String,
    },
    /// People sharing at least one recorded parent with a person
    Siblings {
        /// Person id
        id: String,
    },
    /// Children of a person's children, once per line of descent
    Grandchildren {
        /// Person id
        id: String,
    },
    /// Ancestors, nearest generation first
    Ancestors {
        /// Person id
        id: String,
        /// Limit the walk to this many generations
        #[arg(short, long)]
        generations: Option<u32>,
    },
    /// Descendants, nearest generation first
    Descendants {
        /// Person id
        id: String,
        /// Limit the walk to this many generations
        #[arg(short, long)]
        generations: Option<u32>,
    },
    /// Unions a person is a partner in
    Unions {
        /// Person id
        id: String,
    },
}

pub fn run(args: &KinArgs, cli: &Cli, ctx: &AppContext) -> anyhow::Result<()> {
    match &args.command {
        KinCommands::Parents { id } => {
            let person_id: PersonId = id.parse()?;
            print_people(cli, ctx, &person_id, "Parents", ctx.tree.parents_of(&person_id))
        }
        KinCommands::Children { id } => {
            let person_id: PersonId = id.parse()?;
            print_people(cli, ctx, &person_id, "Children", ctx.tree.children_of(&person_id))
        }
        KinCommands::Siblings { id } => {
            let person_id: PersonId = id.parse()?;
            print_people(cli, ctx, &person_id, "Siblings", ctx.tree.siblings_of(&person_id))
        }
        KinCommands::Grandchildren { id } => {
            let person_id: PersonId = id.parse()?;
            print_people(
                cli,
                ctx,
                &person_id,
                "Grandchildren",
                ctx.tree.grandchildren_of(&person_id),
            )
        }
        KinCommands::Ancestors { id, generations } => {
            let person_id: PersonId = id.parse()?;
            let results = match generations {
                Some(depth) => ctx.tree.ancestors_within(&person_id, *depth),
                None => ctx.tree.ancestors_of(&person_id),
            };
            print_people(cli, ctx, &person_id, "Ancestors", results)
        }
        KinCommands::Descendants { id, generations } => {
            let person_id: PersonId = id.parse()?;
            let results = match generations {
                Some(depth) => ctx.tree.descendants_within(&person_id, *depth),
                None => ctx.tree.descendants_of(&person_id),
            };
            print_people(cli, ctx, &person_id, "Descendants", results)
        }
        KinCommands::Unions { id } => {
            let person_id: PersonId = id.parse()?;
            print_unions(cli, ctx, &person_id, ctx.tree.unions_of(&person_id))
        }
    }
}

/// Display name for the query subject; unknown subjects fall back to the id
fn subject_name(ctx: &AppContext, id: &PersonId) -> String {
    match ctx.tree.find_person(id) {
        Some(person) => person.display_name(),
        None => id.to_string(),
    }
}

fn print_people(
    cli: &Cli,
    ctx: &AppContext,
    subject_id: &PersonId,
    label: &str,
    results: Vec<&Person>,
) -> anyhow::Result<()> {
    match cli.output_format() {
        OutputFormat::Json => println!("{}", output::to_json(&results)?),
        OutputFormat::Table => {
            let subject = subject_name(ctx, subject_id);
            if results.is_empty() {
                println!("{} has no {} recorded.", subject, label.to_lowercase());
            } else {
                println!("{} of {} ({} found):", label, subject, results.len());
                for person in &results {
                    println!("  {}", output::person_line(person));
                }
            }
        }
    }
    Ok(())
}

fn print_unions(
    cli: &Cli,
    ctx: &AppContext,
    subject_id: &PersonId,
    records: Vec<&UnionRecord>,
) -> anyhow::Result<()> {
    match cli.output_format() {
        OutputFormat::Json => println!("{}", output::to_json(&records)?),
        OutputFormat::Table => {
            let subject = subject_name(ctx, subject_id);
            if records.is_empty() {
                println!("{} has no unions recorded.", subject);
            } else {
                println!("Unions of {} ({} found):", subject, records.len());
                for record in &records {
                    println!("  {}", output::union_line(record, &ctx.tree));
                }
            }
        }
    }
    Ok(())
}

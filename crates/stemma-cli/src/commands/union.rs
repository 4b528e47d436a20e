//! Union record commands

use clap::{Args, Subcommand};

use crate::commands::parse_date_arg;
use crate::output::{self, OutputFormat};
use crate::{AppContext, Cli};
use stemma_core::{PersonId, UnionKind, UnionRecord};
use stemma_storage::TreeStore;

#[derive(Args)]
pub struct UnionArgs {
    #[command(subcommand)]
    pub command: UnionCommands,
}

#[derive(Subcommand)]
pub enum UnionCommands {
    /// Record a new union
    Add {
        /// First partner's person id
        #[arg(long)]
        partner_a: Option<String>,
        /// Second partner's person id
        #[arg(long)]
        partner_b: Option<String>,
        /// Kind: marriage, civil_union, partnership
        #[arg(long, default_value = "marriage")]
        kind: String,
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        start_date: Option<String>,
        /// End date (YYYY-MM-DD)
        #[arg(long)]
        end_date: Option<String>,
        /// Location
        #[arg(long)]
        location: Option<String>,
        /// Free-text notes
        #[arg(long)]
        notes: Option<String>,
    },
    /// List all unions
    List,
}

pub fn run(args: &UnionArgs, cli: &Cli, ctx: &mut AppContext) -> anyhow::Result<()> {
    match &args.command {
        UnionCommands::Add {
            partner_a,
            partner_b,
            kind,
            start_date,
            end_date,
            location,
            notes,
        } => {
            let mut record = UnionRecord::new(UnionKind::parse_lossy(kind));
            if let Some(text) = partner_a {
                record = record.with_partner_a(resolve_partner(ctx, text)?);
            }
            if let Some(text) = partner_b {
                record = record.with_partner_b(resolve_partner(ctx, text)?);
            }
            if let Some(text) = start_date {
                record = record.with_start_date(parse_date_arg(text, "start date")?);
            }
            if let Some(text) = end_date {
                record = record.with_end_date(parse_date_arg(text, "end date")?);
            }
            if let Some(place) = location {
                record = record.with_location(place.clone());
            }
            if let Some(text) = notes {
                record = record.with_notes(text.clone());
            }

            let record = ctx.tree.add_union(record).clone();
            ctx.store.save_union(&record)?;
            tracing::info!("Recorded {} union {}", record.kind, record.id);

            match cli.output_format() {
                OutputFormat::Json => println!("{}", output::to_json(&record)?),
                OutputFormat::Table => {
                    println!("Recorded union: {}", output::union_line(&record, &ctx.tree));
                }
            }
        }
        UnionCommands::List => {
            let records: Vec<&UnionRecord> = ctx.tree.list_unions().collect();

            match cli.output_format() {
                OutputFormat::Json => println!("{}", output::to_json(&records)?),
                OutputFormat::Table => {
                    if records.is_empty() {
                        println!("No unions recorded.");
                    } else {
                        println!("{} unions recorded:", records.len());
                        for record in &records {
                            println!("  {}", output::union_line(record, &ctx.tree));
                        }
                    }
                }
            }
        }
    }

    Ok(())
}

/// Parse a partner id; warn when it does not resolve, since unions
/// accept partners the graph does not hold
fn resolve_partner(ctx: &AppContext, text: &str) -> anyhow::Result<PersonId> {
    let id: PersonId = text.parse()?;
    if ctx.tree.find_person(&id).is_none() {
        tracing::warn!("Partner {} is not in the tree; recording anyway", id);
    }
    Ok(id)
}

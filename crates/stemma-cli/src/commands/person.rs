//! Person commands

use clap::{Args, Subcommand};

use crate::commands::parse_date_arg;
use crate::output::{self, OutputFormat};
use crate::{AppContext, Cli};
use stemma_core::{Person, PersonId, Sex};
use stemma_storage::TreeStore;

#[derive(Args)]
pub struct PersonArgs {
    #[command(subcommand)]
    pub command: PersonCommands,
}

#[derive(Subcommand)]
pub enum PersonCommands {
    /// Add a new person
    Add {
        /// Given (first) name
        #[arg(long)]
        given: String,
        /// Family (last) name
        #[arg(long)]
        family: String,
        /// Middle names
        #[arg(long)]
        middle_names: Option<String>,
        /// Sex: male, female, other, unknown
        #[arg(long, default_value = "unknown")]
        sex: String,
        /// Birth date (YYYY-MM-DD)
        #[arg(long)]
        birth_date: Option<String>,
        /// Death date (YYYY-MM-DD)
        #[arg(long)]
        death_date: Option<String>,
        /// Birth place
        #[arg(long)]
        birth_place: Option<String>,
        /// Free-text notes
        #[arg(long)]
        notes: Option<String>,
    },
    /// List all people
    List,
    /// Show one person with their recorded children
    Show {
        /// Person id
        id: String,
    },
}

pub fn run(args: &PersonArgs, cli: &Cli, ctx: &mut AppContext) -> anyhow::Result<()> {
    match &args.command {
        PersonCommands::Add {
            given,
            family,
            middle_names,
            sex,
            birth_date,
            death_date,
            birth_place,
            notes,
        } => {
            if given.trim().is_empty() || family.trim().is_empty() {
                anyhow::bail!("given and family names must not be blank");
            }

            let mut person = Person::new(given.trim(), family.trim(), Sex::parse_lossy(sex));
            if let Some(middle) = middle_names {
                person = person.with_middle_names(middle.clone());
            }
            if let Some(text) = birth_date {
                person = person.with_birth_date(parse_date_arg(text, "birth date")?);
            }
            if let Some(text) = death_date {
                person = person.with_death_date(parse_date_arg(text, "death date")?);
            }
            if let Some(place) = birth_place {
                person = person.with_birth_place(place.clone());
            }
            if let Some(text) = notes {
                person = person.with_notes(text.clone());
            }

            let person = ctx.tree.add_person(person).clone();
            ctx.store.save_person(&person)?;
            tracing::info!("Added person {} ({})", person.display_name(), person.id);

            match cli.output_format() {
                OutputFormat::Json => println!("{}", output::to_json(&person)?),
                OutputFormat::Table => {
                    println!("Added person: {}  {}", person.id, person.display_name());
                }
            }
        }
        PersonCommands::List => {
            let mut people: Vec<&Person> = ctx.tree.list_people().collect();
            people.sort_by(|a, b| {
                (a.family_name.as_str(), a.given_name.as_str())
                    .cmp(&(b.family_name.as_str(), b.given_name.as_str()))
            });

            match cli.output_format() {
                OutputFormat::Json => println!("{}", output::to_json(&people)?),
                OutputFormat::Table => {
                    if people.is_empty() {
                        println!("No people recorded.");
                    } else {
                        println!("{} people recorded:", people.len());
                        for person in &people {
                            println!("  {}", output::person_line(person));
                        }
                    }
                }
            }
        }
        PersonCommands::Show { id } => {
            let person_id: PersonId = id.parse()?;
            let person = match ctx.tree.find_person(&person_id) {
                Some(person) => person,
                None => {
                    println!("No person with id {}", person_id);
                    return Ok(());
                }
            };

            match cli.output_format() {
                OutputFormat::Json => println!("{}", output::to_json(person)?),
                OutputFormat::Table => {
                    println!("Full name: {}", person.display_name());
                    println!("Sex: {}", person.sex);
                    if let Some(birth) = person.birth_date {
                        println!("Born: {}", birth);
                    }
                    if let Some(death) = person.death_date {
                        println!("Died: {}", death);
                    }
                    if let Some(place) = &person.birth_place {
                        println!("Birth place: {}", place);
                    }
                    if let Some(text) = &person.notes {
                        println!("Notes: {}", text);
                    }

                    let children = ctx.tree.children_of(&person_id);
                    if children.is_empty() {
                        println!("Children: none recorded");
                    } else {
                        println!("Children:");
                        for child in &children {
                            println!("  {}", output::person_line(child));
                        }
                    }
                }
            }
        }
    }

    Ok(())
}

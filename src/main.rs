use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use design_client::models::{Attributes, CiSnapshot, CommitOutcome, PlatformPack, VariableScope};
use design_client::transport::HttpTransport;
use design_client::{ClientConfig, Design};

#[derive(Parser)]
#[command(name = "dsgn")]
#[command(about = "Edit assembly designs: platforms, components, variables and releases")]
struct Cli {
    /// Service root, including the organization (overrides DESIGN_API_URL)
    #[arg(long, global = true)]
    url: Option<String>,

    /// Assembly whose design is edited (overrides DESIGN_ASSEMBLY)
    #[arg(long, global = true)]
    assembly: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage platforms
    Platform {
        #[command(subcommand)]
        action: PlatformAction,
    },
    /// Manage platform components
    Component {
        #[command(subcommand)]
        action: ComponentAction,
    },
    /// Manage component attachments
    Attachment {
        #[command(subcommand)]
        action: AttachmentAction,
    },
    /// Manage variables (global unless --platform is given)
    Variable {
        /// Platform owning the variables
        #[arg(short, long)]
        platform: Option<String>,

        #[command(subcommand)]
        action: VariableAction,
    },
    /// Commit the open design release, if any
    Commit,
    /// Print the whole design as YAML
    Extract,
    /// Load platforms from a YAML or JSON file
    Load { file: PathBuf },
}

#[derive(Subcommand)]
enum PlatformAction {
    List,
    Get {
        name: String,
    },
    Create {
        name: String,
        #[arg(long)]
        pack: String,
        #[arg(long)]
        version: String,
        #[arg(long)]
        source: String,
        #[arg(long)]
        comments: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    Delete {
        name: String,
    },
}

#[derive(Subcommand)]
enum ComponentAction {
    List {
        platform: String,
    },
    Get {
        platform: String,
        name: String,
    },
    /// Instantiate a component from a template
    Add {
        platform: String,
        template: String,
        name: String,
        /// Attribute override as key=value (repeatable)
        #[arg(short = 'a', long = "attr", value_parser = parse_key_val)]
        attrs: Vec<(String, String)>,
    },
    Update {
        platform: String,
        name: String,
        #[arg(short = 'a', long = "attr", value_parser = parse_key_val, required = true)]
        attrs: Vec<(String, String)>,
    },
    Delete {
        platform: String,
        name: String,
    },
}

#[derive(Subcommand)]
enum AttachmentAction {
    List {
        platform: String,
        component: String,
    },
    Get {
        platform: String,
        component: String,
        name: String,
    },
    Add {
        platform: String,
        component: String,
        name: String,
        #[arg(short = 'a', long = "attr", value_parser = parse_key_val)]
        attrs: Vec<(String, String)>,
    },
    Update {
        platform: String,
        component: String,
        name: String,
        #[arg(short = 'a', long = "attr", value_parser = parse_key_val)]
        attrs: Vec<(String, String)>,
    },
}

#[derive(Subcommand)]
enum VariableAction {
    List,
    /// Create variables given as NAME=VALUE
    Add {
        #[arg(value_parser = parse_key_val, required = true)]
        vars: Vec<(String, String)>,
        /// Values are already encrypted
        #[arg(long)]
        secure: bool,
    },
    /// Update existing variables given as NAME=VALUE
    Update {
        #[arg(value_parser = parse_key_val, required = true)]
        vars: Vec<(String, String)>,
        #[arg(long)]
        secure: bool,
    },
    Delete {
        name: String,
    },
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got `{}`", s))?;
    Ok((key.to_string(), value.to_string()))
}

/// Initialize tracing on stderr so stdout carries only command output
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "design_client=info".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn build_design(cli: &Cli) -> anyhow::Result<Design> {
    let mut config = ClientConfig::load();
    if let Some(url) = &cli.url {
        config.base_url = url.clone();
    }
    if let Some(assembly) = &cli.assembly {
        config.assembly = Some(assembly.clone());
    }
    let assembly = config.assembly.clone().ok_or_else(|| {
        anyhow::anyhow!("Missing assembly name: pass --assembly or set DESIGN_ASSEMBLY")
    })?;

    let transport = HttpTransport::from_config(&config)?;
    Ok(Design::new(assembly, Arc::new(transport))?)
}

fn print_json(value: &Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_one(snapshot: CiSnapshot) -> anyhow::Result<()> {
    print_json(&snapshot.raw)
}

fn print_many(snapshots: Vec<CiSnapshot>) -> anyhow::Result<()> {
    print_json(&Value::Array(
        snapshots.into_iter().map(|s| s.raw).collect(),
    ))
}

fn to_attributes(pairs: Vec<(String, String)>) -> Attributes {
    pairs.into_iter().collect()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    // Read input files before touching the network.
    let load_content = match &cli.command {
        Commands::Load { file } => Some(
            std::fs::read_to_string(file)
                .with_context(|| format!("Failed to read {}", file.display()))?,
        ),
        _ => None,
    };

    let design = build_design(&cli)?;

    match cli.command {
        Commands::Platform { action } => match action {
            PlatformAction::List => print_many(design.list_platforms().await?)?,
            PlatformAction::Get { name } => print_one(design.get_platform(&name).await?)?,
            PlatformAction::Create {
                name,
                pack,
                version,
                source,
                comments,
                description,
            } => {
                let pack = PlatformPack {
                    name: pack,
                    version,
                    source,
                };
                let created = design
                    .create_platform(&name, &pack, comments.as_deref(), description.as_deref())
                    .await?;
                print_one(created)?
            }
            PlatformAction::Delete { name } => print_one(design.delete_platform(&name).await?)?,
        },
        Commands::Component { action } => match action {
            ComponentAction::List { platform } => {
                print_many(design.list_platform_components(&platform).await?)?
            }
            ComponentAction::Get { platform, name } => {
                print_one(design.get_platform_component(&platform, &name).await?)?
            }
            ComponentAction::Add {
                platform,
                template,
                name,
                attrs,
            } => {
                let created = design
                    .add_platform_component(&platform, &template, &name, &to_attributes(attrs))
                    .await?;
                print_one(created)?
            }
            ComponentAction::Update {
                platform,
                name,
                attrs,
            } => {
                let updated = design
                    .update_platform_component(&platform, &name, &to_attributes(attrs))
                    .await?;
                print_one(updated)?
            }
            ComponentAction::Delete { platform, name } => {
                print_one(design.delete_platform_component(&platform, &name).await?)?
            }
        },
        Commands::Attachment { action } => match action {
            AttachmentAction::List {
                platform,
                component,
            } => print_many(
                design
                    .list_platform_component_attachments(&platform, &component)
                    .await?,
            )?,
            AttachmentAction::Get {
                platform,
                component,
                name,
            } => print_one(
                design
                    .get_platform_component_attachment(&platform, &component, &name)
                    .await?,
            )?,
            AttachmentAction::Add {
                platform,
                component,
                name,
                attrs,
            } => print_one(
                design
                    .add_platform_component_attachment(
                        &platform,
                        &component,
                        &name,
                        &to_attributes(attrs),
                    )
                    .await?,
            )?,
            AttachmentAction::Update {
                platform,
                component,
                name,
                attrs,
            } => print_one(
                design
                    .update_platform_component_attachment(
                        &platform,
                        &component,
                        &name,
                        &to_attributes(attrs),
                    )
                    .await?,
            )?,
        },
        Commands::Variable { platform, action } => {
            let scope = match platform {
                Some(name) => VariableScope::Platform(name),
                None => VariableScope::Global,
            };
            match action {
                VariableAction::List => print_many(design.list_variables(&scope).await?)?,
                VariableAction::Add { vars, secure } => print_many(
                    design
                        .add_variables(&scope, &to_attributes(vars), secure)
                        .await?,
                )?,
                VariableAction::Update { vars, secure } => print_many(
                    design
                        .update_variables(&scope, &to_attributes(vars), secure)
                        .await?,
                )?,
                VariableAction::Delete { name } => {
                    print_one(design.delete_variable(&scope, &name).await?)?
                }
            }
        }
        Commands::Commit => {
            let outcome = design.commit_design().await?;
            match &outcome {
                CommitOutcome::Committed(_) => {
                    tracing::info!("Design of {} committed", design.context().assembly())
                }
                CommitOutcome::NothingToCommit(_) => tracing::info!("No open release to commit"),
            }
            print_json(&outcome.release().raw)?
        }
        Commands::Extract => print!("{}", design.extract_yaml().await?),
        Commands::Load { .. } => {
            let content = load_content.unwrap_or_default();
            print_json(&design.load_design(&content).await?)?
        }
    }

    Ok(())
}

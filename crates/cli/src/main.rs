//! paramdoc CLI
//!
//! Command-line interface for documenting types as parameter tables,
//! JSON examples and SQL DDL.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use paramdoc_common::{FieldDescriptor, Locale, ParamNode, Settings, TypeRef};
use paramdoc_generator::{json_example, to_ddl, DocGenerator, DocView, MarkdownRenderer, ParamRole};
use paramdoc_parser::{flatten_form_params, Direction, TreeBuilder, TypeCatalog, TypeProvider};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "paramdoc")]
#[command(version, about = "Generate parameter tables, JSON examples and SQL DDL from type descriptors", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Settings file (YAML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the parameter tree of a type
    #[command(after_help = "EXAMPLES:\n  \
        paramdoc tree --catalog types.yaml --root com.acme.User\n\n  \
        # Generic roots are written as type expressions\n  \
        paramdoc tree --catalog types.yaml --root 'com.acme.Page<com.acme.User>'")]
    Tree {
        /// Type catalog (JSON or YAML)
        #[arg(long)]
        catalog: PathBuf,

        /// Root type expression
        #[arg(short, long)]
        root: String,

        /// Hide fields ignored on this side of the call
        #[arg(short, long)]
        direction: Option<DirectionArg>,
    },

    /// Render a Markdown parameter table
    #[command(after_help = "EXAMPLES:\n  \
        paramdoc markdown --catalog types.yaml --root com.acme.User --role request-body\n\n  \
        # One table per nested object\n  \
        paramdoc markdown --catalog types.yaml --root com.acme.Order --separate")]
    Markdown {
        /// Type catalog (JSON or YAML)
        #[arg(long)]
        catalog: PathBuf,

        /// Root type expression
        #[arg(short, long)]
        root: String,

        /// What the table documents
        #[arg(long, value_enum, default_value_t = RoleArg::ResponseBody)]
        role: RoleArg,

        /// Use the separated layout
        #[arg(long)]
        separate: bool,

        /// Table label language
        #[arg(long)]
        locale: Option<LocaleArg>,
    },

    /// Render a JSON example
    Example {
        /// Type catalog (JSON or YAML)
        #[arg(long)]
        catalog: PathBuf,

        /// Root type expression
        #[arg(short, long)]
        root: String,
    },

    /// Render a CREATE TABLE statement
    #[command(after_help = "EXAMPLES:\n  \
        paramdoc ddl --catalog types.yaml --root com.acme.User --table t_user")]
    Ddl {
        /// Type catalog (JSON or YAML)
        #[arg(long)]
        catalog: PathBuf,

        /// Root type expression
        #[arg(short, long)]
        root: String,

        /// Table name (defaults to the type's table name, then its simple name)
        #[arg(short, long)]
        table: Option<String>,

        /// Table comment (defaults to the type's doc comment)
        #[arg(long)]
        comment: Option<String>,
    },

    /// Assemble a full API document from a request file
    #[command(after_help = "EXAMPLES:\n  \
        paramdoc doc --catalog types.yaml --request create-user.yaml --output create-user.md")]
    Doc {
        /// Type catalog (JSON or YAML)
        #[arg(long)]
        catalog: PathBuf,

        /// Request description (JSON or YAML)
        #[arg(long)]
        request: PathBuf,

        /// Write the document here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DirectionArg {
    Request,
    Response,
}

impl From<DirectionArg> for Direction {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Request => Direction::Request,
            DirectionArg::Response => Direction::Response,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum RoleArg {
    Header,
    RequestParam,
    RequestBody,
    ResponseBody,
}

impl RoleArg {
    fn role(self) -> ParamRole {
        match self {
            RoleArg::Header => ParamRole::Header,
            RoleArg::RequestParam => ParamRole::RequestParam,
            RoleArg::RequestBody => ParamRole::RequestBody,
            RoleArg::ResponseBody => ParamRole::ResponseBody,
        }
    }

    fn direction(self) -> Option<Direction> {
        match self {
            RoleArg::Header => None,
            RoleArg::RequestParam | RoleArg::RequestBody => Some(Direction::Request),
            RoleArg::ResponseBody => Some(Direction::Response),
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LocaleArg {
    En,
    Zh,
}

impl From<LocaleArg> for Locale {
    fn from(arg: LocaleArg) -> Self {
        match arg {
            LocaleArg::En => Locale::En,
            LocaleArg::Zh => Locale::Zh,
        }
    }
}

/// One API method, as read from a request file
#[derive(Debug, Deserialize)]
struct DocRequest {
    name: String,
    #[serde(default)]
    desc: String,
    #[serde(default = "default_method")]
    method: String,
    path: String,
    #[serde(default)]
    headers: Vec<HeaderSpec>,
    /// Query/form parameters
    #[serde(default)]
    params: Vec<FieldDescriptor>,
    /// Request body type
    #[serde(default)]
    body: Option<TypeRef>,
    /// Response body type
    #[serde(default)]
    response: Option<TypeRef>,
}

#[derive(Debug, Deserialize)]
struct HeaderSpec {
    name: String,
    #[serde(default)]
    value: String,
    #[serde(default)]
    required: bool,
    #[serde(default)]
    desc: String,
}

fn default_method() -> String {
    "GET".to_string()
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        eprintln!("{} Verbose mode enabled", "→".cyan());
    }

    let settings = load_settings(cli.config.as_deref())?;

    match cli.command {
        Commands::Tree {
            catalog,
            root,
            direction,
        } => {
            tree_command(&catalog, &root, direction, &settings)?;
        }
        Commands::Markdown {
            catalog,
            root,
            role,
            separate,
            locale,
        } => {
            let mut settings = settings;
            if separate {
                settings.separate_param = true;
            }
            if let Some(locale) = locale {
                settings.locale = locale.into();
            }
            markdown_command(&catalog, &root, role, &settings)?;
        }
        Commands::Example { catalog, root } => {
            example_command(&catalog, &root, &settings)?;
        }
        Commands::Ddl {
            catalog,
            root,
            table,
            comment,
        } => {
            ddl_command(&catalog, &root, table, comment, &settings)?;
        }
        Commands::Doc {
            catalog,
            request,
            output,
        } => {
            doc_command(&catalog, &request, output.as_deref(), settings)?;
        }
    }

    Ok(())
}

/// Log to stderr; `RUST_LOG` wins over the default level
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_settings(path: Option<&Path>) -> Result<Settings> {
    match path {
        Some(path) => {
            eprintln!("{} Loading settings: {}", "→".cyan(), path.display());
            Settings::load(path).context("Failed to load settings")
        }
        None => Ok(Settings::default()),
    }
}

fn load_catalog(path: &Path) -> Result<TypeCatalog> {
    eprintln!("{} Loading catalog: {}", "→".cyan(), path.display());
    let catalog = TypeCatalog::from_file(path)
        .with_context(|| format!("Failed to load catalog {}", path.display()))?;
    debug!(types = catalog.len(), "catalog loaded");
    Ok(catalog)
}

fn parse_root(root: &str) -> Result<TypeRef> {
    TypeRef::parse(root).with_context(|| format!("Invalid root type '{}'", root))
}

fn build_root(
    catalog: &TypeCatalog,
    root: &TypeRef,
    direction: Option<Direction>,
    settings: &Settings,
) -> Vec<ParamNode> {
    let builder = TreeBuilder::new(catalog, settings);
    let builder = match direction {
        Some(direction) => builder.with_direction(direction),
        None => builder,
    };
    let nodes = builder.build(root);
    if nodes.is_empty() {
        eprintln!(
            "{} {} has no documented fields",
            "!".yellow(),
            root.to_string().yellow()
        );
    }
    nodes
}

fn tree_command(
    catalog_path: &Path,
    root: &str,
    direction: Option<DirectionArg>,
    settings: &Settings,
) -> Result<()> {
    let catalog = load_catalog(catalog_path)?;
    let root = parse_root(root)?;
    let nodes = build_root(&catalog, &root, direction.map(Direction::from), settings);

    println!("{}", root.label().bold());
    print_tree(&nodes, 1);

    eprintln!(
        "\n{} {} nodes",
        "✓".green(),
        ParamNode::tree_len(&nodes)
    );
    Ok(())
}

fn print_tree(nodes: &[ParamNode], depth: usize) {
    for node in nodes {
        let mut flags = Vec::new();
        if node.required {
            flags.push("required");
        }
        if node.is_primary_key {
            flags.push("pk");
        }
        if node.is_collection {
            flags.push("collection");
        }
        if node.is_map {
            flags.push("map");
        }
        let flags = if flags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", flags.join(", "))
        };

        println!(
            "{}{}: {}{}",
            "  ".repeat(depth),
            node.name.cyan(),
            node.declared_type.yellow(),
            flags.dimmed()
        );
        print_tree(&node.children, depth + 1);
    }
}

fn markdown_command(
    catalog_path: &Path,
    root: &str,
    role: RoleArg,
    settings: &Settings,
) -> Result<()> {
    let catalog = load_catalog(catalog_path)?;
    let root = parse_root(root)?;
    let nodes = build_root(&catalog, &root, role.direction(), settings);

    let renderer = MarkdownRenderer::new(settings.locale);
    print!(
        "{}",
        renderer.render(&nodes, role.role(), settings.separate_param)
    );
    Ok(())
}

fn example_command(catalog_path: &Path, root: &str, settings: &Settings) -> Result<()> {
    let catalog = load_catalog(catalog_path)?;
    let root = parse_root(root)?;
    let nodes = build_root(&catalog, &root, None, settings);

    println!("{}", json_example(&nodes));
    Ok(())
}

fn ddl_command(
    catalog_path: &Path,
    root: &str,
    table: Option<String>,
    comment: Option<String>,
    settings: &Settings,
) -> Result<()> {
    let catalog = load_catalog(catalog_path)?;
    let root = parse_root(root)?;
    let descriptor = catalog
        .lookup(&root.name)
        .ok_or_else(|| anyhow!("Type '{}' not found in catalog", root.name))?;

    let table = table.unwrap_or_else(|| descriptor.table().to_string());
    let comment = comment.unwrap_or_else(|| descriptor.comment());
    let nodes = build_root(&catalog, &root, None, settings);

    println!("{}", to_ddl(&table, &comment, &nodes));
    eprintln!("{} Table {}", "✓".green(), table.yellow());
    Ok(())
}

fn load_request(path: &Path) -> Result<DocRequest> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read request file {}", path.display()))?;

    let is_yaml = matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml" | "yml")
    );
    let request = if is_yaml {
        serde_yaml::from_str(&content).context("Failed to parse request YAML")?
    } else {
        serde_json::from_str(&content).context("Failed to parse request JSON")?
    };
    Ok(request)
}

fn doc_command(
    catalog_path: &Path,
    request_path: &Path,
    output: Option<&Path>,
    settings: Settings,
) -> Result<()> {
    let catalog = load_catalog(catalog_path)?;
    let request = load_request(request_path)?;
    eprintln!(
        "{} Documenting {} {}",
        "→".cyan(),
        request.method.to_uppercase().yellow(),
        request.path.yellow()
    );

    let body_tree = |ty: &Option<TypeRef>, direction: Direction, name: &str| {
        ty.as_ref()
            .map(|ty| {
                TreeBuilder::new(&catalog, &settings)
                    .with_direction(direction)
                    .build_parameter(&FieldDescriptor::new(name, ty.clone()))
            })
            .unwrap_or_default()
    };

    let view = DocView {
        name: request.name.clone(),
        desc: request.desc.clone(),
        method: request.method.clone(),
        path: request.path.clone(),
        headers: request
            .headers
            .iter()
            .map(|h| ParamNode::header(&h.name, &h.value, h.required, &h.desc))
            .collect(),
        request_params: flatten_form_params(&catalog, &request.params),
        request_body: body_tree(&request.body, Direction::Request, "body"),
        response_body: body_tree(&request.response, Direction::Response, "data"),
    };

    let generator = DocGenerator::new(settings.clone()).context("Failed to create generator")?;
    let document = generator
        .render(&view)
        .context("Failed to render document")?;

    match output {
        Some(path) => {
            fs::write(path, &document)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!(
                "\n{}",
                format!("✓ Wrote {}", path.display()).green().bold()
            );
        }
        None => print!("{}", document),
    }

    Ok(())
}

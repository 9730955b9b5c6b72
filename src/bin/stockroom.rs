use std::{
    io::{self, BufRead, Write},
    sync::Arc,
};

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use serde::Serialize;
use stockroom_api::{
    client::ApiClient,
    services::inventory::StockLevel,
    views::{
        terminal::{StderrNotifier, StdinPrompt},
        InventoryFilter, InventoryFormView, InventoryListView, Notifier, Prompt, Route,
        SupplierFormView, SupplierListView,
    },
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let client = ApiClient::new(cli.api_url.clone()).context("invalid --api-url")?;
    let context = CliContext {
        client,
        notifier: Arc::new(StderrNotifier),
        prompt: Arc::new(StdinPrompt {
            assume_yes: cli.yes,
        }),
        json: cli.json,
    };

    match cli.command {
        Commands::Suppliers(command) => handle_suppliers_command(&context, command).await,
        Commands::Inventory(command) => handle_inventory_command(&context, command).await,
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "error",
        1 => "warn",
        2 => "info",
        _ => "debug",
    };
    let filter = std::env::var("RUST_LOG")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| format!("stockroom_api={},stockroom={}", level, level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(io::stderr)
        .try_init();
}

#[derive(Parser)]
#[command(name = "stockroom", about = "Terminal frontend for the stockroom API", version)]
struct Cli {
    #[arg(
        long,
        global = true,
        env = "STOCKROOM_API_URL",
        default_value = "http://127.0.0.1:8080",
        help = "Base URL of the stockroom API"
    )]
    api_url: String,
    #[arg(
        long,
        global = true,
        action = ArgAction::SetTrue,
        help = "Render list output as pretty JSON"
    )]
    json: bool,
    #[arg(
        short = 'y',
        long,
        global = true,
        action = ArgAction::SetTrue,
        help = "Answer yes to delete confirmations"
    )]
    yes: bool,
    #[arg(short, long, global = true, action = ArgAction::Count, help = "Increase log verbosity")]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(subcommand)]
    Suppliers(SuppliersCommands),
    #[command(subcommand)]
    Inventory(InventoryCommands),
}

#[derive(Subcommand)]
enum SuppliersCommands {
    List,
    Add(SupplierArgs),
    Edit(EditSupplierArgs),
    Delete(IdArgs),
}

#[derive(Subcommand)]
enum InventoryCommands {
    List,
    Filter(FilterArgs),
    Add(ItemArgs),
    Edit(EditItemArgs),
    Delete(IdArgs),
}

#[derive(Args)]
struct IdArgs {
    id: i32,
}

#[derive(Args)]
struct SupplierArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    contact: Option<String>,
}

#[derive(Args)]
struct EditSupplierArgs {
    id: i32,
    #[command(flatten)]
    fields: SupplierArgs,
}

#[derive(Args)]
struct ItemArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    category: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    quantity: Option<i32>,
    #[arg(long, help = "Owning supplier; chosen interactively when omitted")]
    supplier: Option<i32>,
}

#[derive(Args)]
struct EditItemArgs {
    id: i32,
    #[command(flatten)]
    fields: ItemArgs,
}

#[derive(Args)]
struct FilterArgs {
    #[arg(long)]
    category: Option<String>,
    #[arg(long, help = "low, out or in")]
    stock: Option<StockLevel>,
}

struct CliContext {
    client: ApiClient,
    notifier: Arc<dyn Notifier>,
    prompt: Arc<dyn Prompt>,
    json: bool,
}

impl CliContext {
    fn supplier_list(&self) -> SupplierListView {
        SupplierListView::new(self.client.clone(), self.notifier.clone(), self.prompt.clone())
    }

    fn inventory_list(&self) -> InventoryListView {
        InventoryListView::new(self.client.clone(), self.notifier.clone(), self.prompt.clone())
    }
}

async fn handle_suppliers_command(context: &CliContext, command: SuppliersCommands) -> Result<()> {
    match command {
        SuppliersCommands::List => navigate(context, Route::SupplierList).await,
        SuppliersCommands::Add(args) => {
            let mut view =
                SupplierFormView::new(context.client.clone(), context.notifier.clone(), Route::SupplierCreate);
            apply_supplier_args(&mut view, args);
            finish_form(context, view.submit().await).await
        }
        SuppliersCommands::Edit(args) => {
            let mut view = SupplierFormView::new(
                context.client.clone(),
                context.notifier.clone(),
                Route::SupplierEdit(args.id),
            );
            if let Some(route) = view.init().await {
                navigate(context, route).await?;
                bail!("supplier {} could not be loaded", args.id);
            }
            apply_supplier_args(&mut view, args.fields);
            finish_form(context, view.submit().await).await
        }
        SuppliersCommands::Delete(args) => {
            let mut view = context.supplier_list();
            if view.delete(args.id).await {
                render_suppliers(context, &view)?;
            }
            Ok(())
        }
    }
}

async fn handle_inventory_command(context: &CliContext, command: InventoryCommands) -> Result<()> {
    match command {
        InventoryCommands::List => navigate(context, Route::InventoryList).await,
        InventoryCommands::Filter(args) => {
            let mut view = context.inventory_list();
            view.load_suppliers().await;
            view.apply_filter(&InventoryFilter {
                category: args.category,
                stock: args.stock,
            })
            .await;
            render_inventory(context, &view)
        }
        InventoryCommands::Add(args) => {
            let mut view = InventoryFormView::new(
                context.client.clone(),
                context.notifier.clone(),
                Route::InventoryCreate,
            );
            view.init().await;
            apply_item_args(&mut view, args)?;
            finish_form(context, view.submit().await).await
        }
        InventoryCommands::Edit(args) => {
            let mut view = InventoryFormView::new(
                context.client.clone(),
                context.notifier.clone(),
                Route::InventoryEdit(args.id),
            );
            if let Some(route) = view.init().await {
                navigate(context, route).await?;
                bail!("inventory item {} could not be loaded", args.id);
            }
            apply_item_args(&mut view, args.fields)?;
            finish_form(context, view.submit().await).await
        }
        InventoryCommands::Delete(args) => {
            let mut view = context.inventory_list();
            view.load().await;
            if view.delete(args.id).await {
                render_inventory(context, &view)?;
            }
            Ok(())
        }
    }
}

fn apply_supplier_args(view: &mut SupplierFormView, args: SupplierArgs) {
    let form = view.form_mut();
    if let Some(name) = args.name {
        form.name = name;
    }
    if let Some(email) = args.email {
        form.email = email;
    }
    if let Some(phone) = args.phone {
        form.phone = phone;
    }
    if let Some(contact) = args.contact {
        form.contact = contact;
    }
}

fn apply_item_args(view: &mut InventoryFormView, args: ItemArgs) -> Result<()> {
    let supplier_id = match args.supplier {
        Some(id) => Some(id),
        None if view.form().supplier_id.is_none() => pick_supplier(view)?,
        None => view.form().supplier_id,
    };

    let form = view.form_mut();
    if let Some(name) = args.name {
        form.name = name;
    }
    if let Some(category) = args.category {
        form.category = category;
    }
    if let Some(quantity) = args.quantity {
        form.quantity = quantity;
    }
    form.supplier_id = supplier_id;
    Ok(())
}

/// Supplier picker: lists the loaded suppliers and reads an id from stdin
fn pick_supplier(view: &InventoryFormView) -> Result<Option<i32>> {
    let options = view.supplier_options();
    if options.is_empty() {
        return Ok(None);
    }

    let mut stderr = io::stderr();
    writeln!(stderr, "Suppliers:")?;
    for supplier in options {
        writeln!(stderr, "  {:>4}  {}", supplier.id, supplier.name)?;
    }
    write!(stderr, "Supplier id (blank for none): ")?;
    stderr.flush()?;

    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("failed to read supplier choice")?;
    let answer = answer.trim();
    if answer.is_empty() {
        return Ok(None);
    }
    answer
        .parse::<i32>()
        .map(Some)
        .with_context(|| format!("'{}' is not a supplier id", answer))
}

async fn finish_form(context: &CliContext, next: Option<Route>) -> Result<()> {
    match next {
        Some(route) => navigate(context, route).await,
        None => bail!("changes were not saved"),
    }
}

async fn navigate(context: &CliContext, route: Route) -> Result<()> {
    match route {
        Route::SupplierList => {
            let mut view = context.supplier_list();
            view.load().await;
            render_suppliers(context, &view)
        }
        Route::InventoryList => {
            let mut view = context.inventory_list();
            view.load().await;
            render_inventory(context, &view)
        }
        other => {
            println!("{}", other);
            Ok(())
        }
    }
}

fn render_suppliers(context: &CliContext, view: &SupplierListView) -> Result<()> {
    if context.json {
        return print_json(&view.suppliers());
    }

    println!("{:>4}  {:<30} {:<30} {:<16} {}", "ID", "NAME", "EMAIL", "PHONE", "CONTACT");
    for supplier in view.suppliers() {
        println!(
            "{:>4}  {:<30} {:<30} {:<16} {}",
            supplier.id,
            supplier.name,
            supplier.email.as_deref().unwrap_or("-"),
            supplier.phone.as_deref().unwrap_or("-"),
            supplier.contact.as_deref().unwrap_or("-"),
        );
    }
    Ok(())
}

fn render_inventory(context: &CliContext, view: &InventoryListView) -> Result<()> {
    if context.json {
        return print_json(&view.items());
    }

    println!("{:>4}  {:<30} {:<20} {:>8}  {}", "ID", "NAME", "CATEGORY", "QUANTITY", "SUPPLIER");
    for item in view.items() {
        println!(
            "{:>4}  {:<30} {:<20} {:>8}  {}",
            item.id,
            item.name,
            item.category,
            item.quantity,
            view.supplier_name(item.supplier_id),
        );
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

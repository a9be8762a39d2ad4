use clap::{Args, Parser, Subcommand};
use frames_of_life::auth::{FixedCredentials, SessionGate};
use frames_of_life::context::{ContentContext, ContentEvent};
use frames_of_life::editor::{GalleryEditor, PricingEditor};
use frames_of_life::enquiry::{DialogState, Enquiry, EnquiryDialog, EventType, SimulatedIntake};
use frames_of_life::ids::UuidGenerator;
use frames_of_life::model::{PlanColor, PlanDraft};
use frames_of_life::store::{FileStore, Store};
use frames_of_life::{config, logging, output, render};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::Receiver;

#[derive(Parser)]
#[command(name = "frames-of-life")]
#[command(about = "Marketing site and content admin for a photography studio")]
#[command(long_about = "\
Marketing site and content admin for a photography studio

The public site is a single page: hero, services, gallery, pricing, contact
footer and an enquiry form. Gallery images and pricing packages live in a
JSON store file and are managed through the admin commands.

Addressing:
  /                 public site
  /?admin=true      admin login, or the dashboard once logged in
  &tab=pricing      dashboard pricing tab (gallery is the default)

Admin workflow:
  frames-of-life login --username admin --password password
  frames-of-life gallery add --src https://... --alt \"Sunset\" --category Landscape
  frames-of-life pricing edit <ID> --price 549
  frames-of-life build

Run 'frames-of-life gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Site configuration file
    #[arg(long, default_value = "config.toml", global = true)]
    config: PathBuf,

    /// Store file (overrides `store_path` from the config)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Log debug events to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the public site to <OUTPUT>/index.html
    Build {
        #[arg(long, default_value = "dist")]
        output: PathBuf,
    },
    /// Print the HTML a URL resolves to (public site, login or dashboard)
    View { url: String },
    /// Open an admin session
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Close the admin session
    Logout,
    /// Show session state and content counts
    Status,
    /// List and manage gallery images
    #[command(subcommand)]
    Gallery(GalleryCommand),
    /// List and manage pricing packages
    #[command(subcommand)]
    Pricing(PricingCommand),
    /// Replace the gallery and pricing with the built-in defaults (admin)
    Reset,
    /// Send an enquiry through the simulated intake
    Enquire(EnquireArgs),
    /// Print a stock config.toml with all options documented
    GenConfig,
}

#[derive(Subcommand)]
enum GalleryCommand {
    /// List gallery images
    List,
    /// Add an image (admin)
    Add {
        #[arg(long)]
        src: String,
        #[arg(long)]
        alt: String,
        #[arg(long)]
        category: String,
    },
    /// Change fields of an image (admin)
    Edit {
        id: String,
        #[arg(long)]
        src: Option<String>,
        #[arg(long)]
        alt: Option<String>,
        #[arg(long)]
        category: Option<String>,
    },
    /// Delete an image (admin)
    Remove { id: String },
}

#[derive(Subcommand)]
enum PricingCommand {
    /// List pricing packages
    List,
    /// Add a package, starting from the "New Package" preset (admin)
    Add(PlanArgs),
    /// Change fields of a package (admin)
    Edit {
        id: String,
        #[command(flatten)]
        plan: PlanArgs,
    },
    /// Delete a package (admin)
    Remove { id: String },
}

/// Package fields. Omitted flags keep the current (or preset) value.
#[derive(Args)]
struct PlanArgs {
    #[arg(long)]
    name: Option<String>,
    /// Whole currency units
    #[arg(long, allow_negative_numbers = true)]
    price: Option<i64>,
    #[arg(long)]
    description: Option<String>,
    /// Included feature; repeat for several. Replaces the current list.
    #[arg(long = "feature")]
    features: Vec<String>,
    /// Excluded feature; repeat for several. Replaces the current list.
    #[arg(long = "not-included")]
    not_included: Vec<String>,
    /// Mark as the "Most Popular" package
    #[arg(long)]
    popular: Option<bool>,
    /// Card color: accent or neutral
    #[arg(long)]
    color: Option<PlanColor>,
}

#[derive(Args)]
struct EnquireArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long, default_value = "")]
    phone: String,
    /// wedding, portrait, event, commercial or other
    #[arg(long)]
    event_type: Option<EventType>,
    #[arg(long, default_value = "")]
    event_date: String,
    #[arg(long, default_value = "")]
    message: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if matches!(cli.command, Command::GenConfig) {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let site_config = config::load_config(&cli.config)?;
    let store_path = cli
        .store
        .clone()
        .unwrap_or_else(|| PathBuf::from(&site_config.store_path));
    let store: Arc<dyn Store> = Arc::new(FileStore::open(&store_path)?);
    let content = Arc::new(ContentContext::load(
        Arc::clone(&store),
        Arc::new(UuidGenerator),
    )?);
    let mut session = SessionGate::load(Arc::clone(&store))?;
    let events = content.subscribe();

    match cli.command {
        Command::Build { output: out_dir } => {
            let year = render::current_year();
            let index = render::build_site(&out_dir, &site_config, &content, year)?;
            output::print_build_output(&index, &content.snapshot());
        }
        Command::View { url } => {
            let page = render::render_url(
                &url,
                &site_config,
                &content,
                &session,
                render::current_year(),
            );
            println!("{}", page.into_string());
        }
        Command::Login { username, password } => {
            let verifier =
                FixedCredentials::new(&site_config.admin.username, &site_config.admin.password);
            session.login(&verifier, &username, &password)?;
            println!("Logged in as {}", username);
        }
        Command::Logout => {
            session.logout()?;
            println!("Logged out");
        }
        Command::Status => {
            output::print_status(session.state(), &store_path, &content.snapshot());
        }
        Command::Gallery(command) => run_gallery(command, &content, &session)?,
        Command::Pricing(command) => run_pricing(command, &content, &session)?,
        Command::Reset => {
            session.require_login()?;
            content.reset()?;
        }
        Command::Enquire(args) => {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .build()?;
            runtime.block_on(run_enquiry(args, &site_config))?;
        }
        Command::GenConfig => {}
    }

    print_events(&events);
    Ok(())
}

fn run_gallery(
    command: GalleryCommand,
    content: &Arc<ContentContext>,
    session: &SessionGate,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut editor = GalleryEditor::new(Arc::clone(content));
    match command {
        GalleryCommand::List => output::print_gallery(&editor.images()),
        GalleryCommand::Add { src, alt, category } => {
            session.require_login()?;
            editor.open_add_form();
            if let Some(draft) = editor.add_form_mut() {
                draft.src = src;
                draft.alt = alt;
                draft.category = category;
            }
            match editor.commit_add()? {
                Some(id) => println!("Added image {}", id),
                None => return Err("an image needs a source, alt text and a category".into()),
            }
        }
        GalleryCommand::Edit {
            id,
            src,
            alt,
            category,
        } => {
            session.require_login()?;
            if !editor.begin_edit(&id) {
                return Err(format!("no gallery image with id '{id}'").into());
            }
            if let Some(draft) = editor.editing_mut() {
                if let Some(src) = src {
                    draft.src = src;
                }
                if let Some(alt) = alt {
                    draft.alt = alt;
                }
                if let Some(category) = category {
                    draft.category = category;
                }
            }
            if !editor.commit_edit()? {
                return Err("an image needs a source, alt text and a category".into());
            }
            println!("Updated image {}", id);
        }
        GalleryCommand::Remove { id } => {
            session.require_login()?;
            if !editor.delete(&id)? {
                return Err(format!("no gallery image with id '{id}'").into());
            }
            println!("Removed image {}", id);
        }
    }
    Ok(())
}

fn run_pricing(
    command: PricingCommand,
    content: &Arc<ContentContext>,
    session: &SessionGate,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut editor = PricingEditor::new(Arc::clone(content));
    match command {
        PricingCommand::List => output::print_pricing(&editor.plans()),
        PricingCommand::Add(plan) => {
            session.require_login()?;
            editor.open_add_form();
            apply_plan_args(&mut editor, plan);
            match editor.commit()? {
                Some(id) => println!("Added package {}", id),
                None => return Err("a package needs a name".into()),
            }
        }
        PricingCommand::Edit { id, plan } => {
            session.require_login()?;
            if !editor.begin_edit(&id) {
                return Err(format!("no pricing package with id '{id}'").into());
            }
            apply_plan_args(&mut editor, plan);
            match editor.commit()? {
                Some(id) => println!("Updated package {}", id),
                None => return Err("a package needs a name".into()),
            }
        }
        PricingCommand::Remove { id } => {
            session.require_login()?;
            if !editor.delete(&id)? {
                return Err(format!("no pricing package with id '{id}'").into());
            }
            println!("Removed package {}", id);
        }
    }
    Ok(())
}

/// Copy the given flags onto the open form. List flags replace the list.
fn apply_plan_args(editor: &mut PricingEditor, args: PlanArgs) {
    if let Some(draft) = editor.draft_mut() {
        set_plan_fields(draft, &args);
    }
    for feature in &args.features {
        editor.push_feature(feature);
    }
    for item in &args.not_included {
        editor.push_not_included(item);
    }
}

fn set_plan_fields(draft: &mut PlanDraft, args: &PlanArgs) {
    if let Some(name) = &args.name {
        draft.name = name.clone();
    }
    if let Some(price) = args.price {
        draft.price = price;
    }
    if let Some(description) = &args.description {
        draft.description = description.clone();
    }
    if let Some(popular) = args.popular {
        draft.popular = popular;
    }
    if let Some(color) = args.color {
        draft.color = color;
    }
    if !args.features.is_empty() {
        draft.features.clear();
    }
    if !args.not_included.is_empty() {
        draft.not_included.clear();
    }
}

/// Submit an enquiry and print each dialog state until it closes.
async fn run_enquiry(
    args: EnquireArgs,
    site_config: &config::SiteConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let enquiry = Enquiry {
        name: args.name,
        email: args.email,
        phone: args.phone,
        event_type: args.event_type,
        event_date: args.event_date,
        message: args.message,
    };
    let dialog =
        EnquiryDialog::new(site_config.enquiry.confirmation_delay()).with_enquiry(enquiry);
    let mut states = dialog.watch();
    let intake = Arc::new(SimulatedIntake::new(site_config.enquiry.submit_delay()));

    let handle = dialog.submit(intake, || tracing::debug!("enquiry dialog closed"))?;
    while states.changed().await.is_ok() {
        let state = states.borrow_and_update().clone();
        println!("{}", output::format_dialog_state(&state));
        if matches!(state, DialogState::Closed | DialogState::Failed(_)) {
            break;
        }
    }
    handle.join().await?;
    Ok(())
}

/// Report every content change the command made.
fn print_events(events: &Receiver<ContentEvent>) {
    for event in events.try_iter() {
        println!("{}", output::format_content_event(&event));
    }
}

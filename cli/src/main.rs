//! Command-line driver for the storefront widgets.
//!
//! Each command renders a headless copy of the storefront page, fires one UI
//! event against a live server, and prints the DOM mutations it caused.

mod client;
mod prefs;

use std::path::PathBuf;
use std::rc::Rc;

use clap::{Args, Parser, Subcommand, ValueEnum};
use storefront_widgets::env::Environment;
use storefront_widgets::headless::HeadlessDom;
use storefront_widgets::widgets::{AddOutcome, AddToCartStyle, ReviewInputError, ReviewOutcome, Theme};
use storefront_widgets::{Dispatched, Storefront, StorefrontConfig, UiEvent};
use tracing_subscriber::EnvFilter;

use client::{ReqwestClient, TokioTimer};
use prefs::FilePreferences;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("http client setup failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
    #[error("cart request failed; see log for details")]
    CartFailed,
    #[error("cart count unavailable; see log for details")]
    CountUnavailable,
    #[error("review rejected by server: {0}")]
    ReviewRejected(String),
    #[error("review not submitted: {0}")]
    ReviewInvalid(#[from] ReviewInputError),
    #[error("review request failed; see log for details")]
    ReviewFailed,
}

#[derive(Parser, Debug)]
#[command(name = "storefront", about = "Drive the storefront widgets against a running shop")]
struct Cli {
    #[arg(long, env = "STOREFRONT_BASE_URL", default_value = "http://127.0.0.1:5000")]
    base_url: String,

    /// Raw `Cookie` header value carrying the shop session.
    #[arg(long, env = "STOREFRONT_SESSION_COOKIE")]
    session_cookie: Option<String>,

    /// JSON file standing in for the browser's localStorage.
    #[arg(long, env = "STOREFRONT_PREFS")]
    prefs: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Cart(CartCommand),
    /// Submit a review for a product.
    Review {
        product_id: String,
        #[arg(long)]
        rating: String,
        #[arg(long)]
        text: String,
    },
    Theme(ThemeCommand),
}

#[derive(Args, Debug)]
struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Subcommand, Debug)]
enum CartSubcommand {
    /// Fetch and display the cart count.
    Count,
    /// Add one product to the cart.
    Add {
        product_id: String,
        /// Use the quantity-carrying variant that renders the POST reply.
        #[arg(long, default_value_t = false)]
        inline: bool,
    },
}

#[derive(Args, Debug)]
struct ThemeCommand {
    #[command(subcommand)]
    command: ThemeSubcommand,
}

#[derive(Subcommand, Debug)]
enum ThemeSubcommand {
    /// Print the stored theme.
    Show,
    /// Flip the toggle as a user click would.
    Toggle,
    /// Force a theme.
    Set { theme: ThemeArg },
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum ThemeArg {
    Light,
    Dark,
}

impl From<ThemeArg> for Theme {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Light => Self::Light,
            ThemeArg::Dark => Self::Dark,
        }
    }
}

/// One headless page wired to real seams.
struct Page {
    config: StorefrontConfig,
    dom: Rc<HeadlessDom>,
    storefront: Storefront,
}

impl Page {
    fn open(cli: &Cli, path: &str) -> Result<Self, CliError> {
        let config = StorefrontConfig::from_env();
        let http = ReqwestClient::new(&cli.base_url, cli.session_cookie.as_deref())?;
        let dom = Rc::new(HeadlessDom::storefront_page(path, &config.ids));
        let env = Environment::new(
            Rc::new(http),
            Rc::new(FilePreferences::new(cli.prefs.clone())),
            dom.clone(),
            Rc::new(TokioTimer),
        );
        let storefront = Storefront::new(env, config.clone());
        Ok(Self { config, dom, storefront })
    }

    fn print_journal(&self) {
        for mutation in self.dom.take_journal() {
            println!("{mutation}");
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match &cli.command {
        Command::Cart(cart) => run_cart(&cli, &cart.command).await,
        Command::Review { product_id, rating, text } => run_review(&cli, product_id, rating, text).await,
        Command::Theme(theme) => run_theme(&cli, &theme.command),
    }
}

async fn run_cart(cli: &Cli, command: &CartSubcommand) -> Result<(), CliError> {
    let page = Page::open(cli, "/")?;
    match command {
        CartSubcommand::Count => {
            let count = page.storefront.cart.refresh_cart_display().await;
            page.print_journal();
            let count = count.ok_or(CliError::CountUnavailable)?;
            println!("cart count: {count}");
        }
        CartSubcommand::Add { product_id, inline } => {
            let style = if *inline { AddToCartStyle::Inline } else { AddToCartStyle::Refetch };
            let event = UiEvent::AddToCart { product_id: product_id.clone(), style };
            let outcome = page.storefront.dispatch(event).await;
            page.print_journal();
            match outcome {
                Dispatched::Cart(AddOutcome::Added { displayed: Some(count) }) => println!("added; cart count: {count}"),
                Dispatched::Cart(AddOutcome::Added { displayed: None }) => println!("added; cart count unavailable"),
                _ => return Err(CliError::CartFailed),
            }
        }
    }
    Ok(())
}

async fn run_review(cli: &Cli, product_id: &str, rating: &str, text: &str) -> Result<(), CliError> {
    let page = Page::open(cli, &format!("/product/{product_id}"))?;
    page.dom.type_value(&page.config.ids.rating, rating);
    page.dom.type_value(&page.config.ids.review_text, text);

    let outcome = page.storefront.dispatch(UiEvent::ReviewSubmitted).await;
    page.print_journal();
    match outcome {
        Dispatched::Review(ReviewOutcome::Posted(review)) => {
            println!("posted review by {} at {}", review.author.username, review.created_at);
            Ok(())
        }
        Dispatched::Review(ReviewOutcome::Rejected(message)) => Err(CliError::ReviewRejected(message)),
        Dispatched::Review(ReviewOutcome::Invalid(e)) => Err(e.into()),
        _ => Err(CliError::ReviewFailed),
    }
}

fn run_theme(cli: &Cli, command: &ThemeSubcommand) -> Result<(), CliError> {
    let page = Page::open(cli, "/")?;
    let theme = &page.storefront.theme;
    let result = match command {
        ThemeSubcommand::Show => theme.stored(),
        ThemeSubcommand::Toggle => {
            theme.init();
            page.dom.take_journal();
            page.dom.click_checkbox(&page.config.ids.mode_toggle);
            theme.on_change()
        }
        ThemeSubcommand::Set { theme: wanted } => {
            let wanted = Theme::from(*wanted);
            theme.set(wanted);
            wanted
        }
    };
    page.print_journal();
    println!("theme: {result}");
    Ok(())
}
